//! ToolRequest - a typed invocation of one of the travel tools

use serde_json::{Map, Value, json};
use tracing::debug;

use super::ToolError;

pub const SEARCH_FLIGHTS: &str = "search_flights";
pub const SEARCH_HOTELS: &str = "search_hotels";
pub const FIND_ACTIVITIES: &str = "find_activities";

/// One lookup, either decoded from a model tool call or built directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    Flights {
        origin: String,
        destination: String,
        date: String,
    },
    Hotels {
        destination: String,
        nights: u32,
    },
    Activities {
        destination: String,
        category: String,
    },
}

impl ToolRequest {
    /// Decode a tool call by name and JSON arguments
    pub fn from_call(name: &str, args: &Value) -> Result<Self, ToolError> {
        debug!(%name, ?args, "ToolRequest::from_call: called");
        let map = match args {
            Value::Object(map) => map,
            Value::Null => &Map::new(),
            _ => return Err(ToolError::InvalidArgument(format!("arguments for {} must be an object", name))),
        };

        match name {
            SEARCH_FLIGHTS => Ok(Self::Flights {
                origin: string_arg(name, map, "origin")?,
                destination: string_arg(name, map, "destination")?,
                date: string_arg(name, map, "date")?,
            }),
            SEARCH_HOTELS => Ok(Self::Hotels {
                destination: string_arg(name, map, "destination")?,
                nights: count_arg(name, map, "num_nights")?,
            }),
            FIND_ACTIVITIES => Ok(Self::Activities {
                destination: string_arg(name, map, "destination")?,
                category: string_arg(name, map, "category")?,
            }),
            _ => {
                debug!("ToolRequest::from_call: unknown tool");
                Err(ToolError::UnknownTool { name: name.to_string() })
            }
        }
    }

    /// Name of the tool this request targets
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Flights { .. } => SEARCH_FLIGHTS,
            Self::Hotels { .. } => SEARCH_HOTELS,
            Self::Activities { .. } => FIND_ACTIVITIES,
        }
    }

    /// Arguments in the same shape the model sends
    pub fn arguments(&self) -> Value {
        match self {
            Self::Flights {
                origin,
                destination,
                date,
            } => json!({"origin": origin, "destination": destination, "date": date}),
            Self::Hotels { destination, nights } => json!({"destination": destination, "num_nights": nights}),
            Self::Activities { destination, category } => json!({"destination": destination, "category": category}),
        }
    }
}

impl std::fmt::Display for ToolRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flights {
                origin,
                destination,
                date,
            } => write!(f, "Searching for flights from {} to {} on {}", origin, destination, date),
            Self::Hotels { destination, nights } => {
                write!(f, "Searching for hotels in {} for {} nights", destination, nights)
            }
            Self::Activities { destination, category } => {
                write!(f, "Finding activities in {} under the category '{}'", destination, category)
            }
        }
    }
}

fn string_arg(tool: &str, map: &Map<String, Value>, arg: &str) -> Result<String, ToolError> {
    match map.get(arg) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        None | Some(Value::Null) => Err(ToolError::MissingArgument {
            tool: tool.to_string(),
            arg: arg.to_string(),
        }),
        Some(other) => Err(ToolError::InvalidArgument(format!("{} must be a string, got {}", arg, other))),
    }
}

/// Accepts `5`, `5.0` and `"5"`; some providers send integers as floats
fn count_arg(tool: &str, map: &Map<String, Value>, arg: &str) -> Result<u32, ToolError> {
    let invalid = |v: &Value| ToolError::InvalidArgument(format!("{} must be a non-negative integer, got {}", arg, v));
    match map.get(arg) {
        None | Some(Value::Null) => Err(ToolError::MissingArgument {
            tool: tool.to_string(),
            arg: arg.to_string(),
        }),
        Some(v @ Value::Number(n)) => {
            if let Some(i) = n.as_u64() {
                return u32::try_from(i).map_err(|_| invalid(v));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
                _ => Err(invalid(v)),
            }
        }
        Some(v @ Value::String(s)) => s.trim().parse::<u32>().map_err(|_| invalid(v)),
        Some(other) => Err(invalid(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_call_flights() {
        let req = ToolRequest::from_call(
            SEARCH_FLIGHTS,
            &json!({"origin": "Mumbai", "destination": "Goa", "date": "December"}),
        )
        .unwrap();
        assert_eq!(
            req,
            ToolRequest::Flights {
                origin: "Mumbai".to_string(),
                destination: "Goa".to_string(),
                date: "December".to_string(),
            }
        );
        assert_eq!(req.tool_name(), SEARCH_FLIGHTS);
    }

    #[test]
    fn test_from_call_hotels_accepts_float_and_string_nights() {
        for nights in [json!(5), json!(5.0), json!("5")] {
            let req = ToolRequest::from_call(SEARCH_HOTELS, &json!({"destination": "Goa", "num_nights": nights})).unwrap();
            assert_eq!(
                req,
                ToolRequest::Hotels {
                    destination: "Goa".to_string(),
                    nights: 5
                }
            );
        }
    }

    #[test]
    fn test_from_call_hotels_rejects_fractional_nights() {
        let err = ToolRequest::from_call(SEARCH_HOTELS, &json!({"destination": "Goa", "num_nights": 2.5})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));

        let err = ToolRequest::from_call(SEARCH_HOTELS, &json!({"destination": "Goa", "num_nights": -1})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_call_missing_argument() {
        let err = ToolRequest::from_call(FIND_ACTIVITIES, &json!({"destination": "Goa"})).unwrap_err();
        assert_eq!(
            err,
            ToolError::MissingArgument {
                tool: FIND_ACTIVITIES.to_string(),
                arg: "category".to_string()
            }
        );
    }

    #[test]
    fn test_from_call_unknown_tool() {
        let err = ToolRequest::from_call("book_taxi", &json!({})).unwrap_err();
        assert_eq!(
            err,
            ToolError::UnknownTool {
                name: "book_taxi".to_string()
            }
        );
    }

    #[test]
    fn test_from_call_non_object_arguments() {
        let err = ToolRequest::from_call(SEARCH_FLIGHTS, &json!(["Mumbai"])).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
    }

    #[test]
    fn test_display_trace_line() {
        let req = ToolRequest::Activities {
            destination: "Goa".to_string(),
            category: "food".to_string(),
        };
        assert_eq!(req.to_string(), "Finding activities in Goa under the category 'food'");
    }

    proptest! {
        #[test]
        fn prop_arguments_decode_back(dest in "[A-Za-z ]{1,20}", nights in 0u32..365) {
            let req = ToolRequest::Hotels { destination: dest, nights };
            let decoded = ToolRequest::from_call(req.tool_name(), &req.arguments()).unwrap();
            prop_assert_eq!(decoded, req);
        }
    }
}

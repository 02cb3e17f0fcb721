use crate::{
    metrics::InputField,
    presentation::{PieChartSink, ReadoutSink},
    widget::{Evaluation, InputValues, RiskWidget},
};
use serde::{Deserialize, Deserializer, Serialize};

/// Commands a host sends to the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetCommand {
    /// One control changed. Sent on every keystroke or drag step.
    Input {
        field: InputField,
        #[serde(deserialize_with = "field_text")]
        value: String,
    },
    /// Several controls changed together. Absent fields keep their text.
    Set {
        #[serde(default, deserialize_with = "opt_field_text")]
        days: Option<String>,
        #[serde(default, deserialize_with = "opt_field_text")]
        spending: Option<String>,
        #[serde(default, deserialize_with = "opt_field_text")]
        frequency: Option<String>,
    },
    Reset,
    GetState,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Rendered(Evaluation),
    Unchanged,
    Quit,
}

impl WidgetCommand {
    pub fn apply<T: ReadoutSink, P: PieChartSink>(&self, widget: &mut RiskWidget<T, P>) -> CommandOutcome {
        match self {
            WidgetCommand::Input { field, value } => {
                CommandOutcome::Rendered(widget.on_change(*field, value))
            }
            WidgetCommand::Set { days, spending, frequency } => {
                let current = widget.inputs();
                let next = InputValues {
                    days:      days.clone().unwrap_or_else(|| current.days.clone()),
                    spending:  spending.clone().unwrap_or_else(|| current.spending.clone()),
                    frequency: frequency.clone().unwrap_or_else(|| current.frequency.clone()),
                };
                CommandOutcome::Rendered(widget.set_all(next))
            }
            WidgetCommand::Reset    => CommandOutcome::Rendered(widget.reset()),
            WidgetCommand::GetState => CommandOutcome::Unchanged,
            WidgetCommand::Quit     => CommandOutcome::Quit,
        }
    }
}

/// Field text arrives as a string from a text box, but a JSON host may
/// send a bare number. Null reads as an empty field.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldText {
    Text(String),
    Number(serde_json::Number),
    Empty(()),
}

impl From<FieldText> for String {
    fn from(t: FieldText) -> String {
        match t {
            FieldText::Text(s)   => s,
            FieldText::Number(n) => n.to_string(),
            FieldText::Empty(()) => String::new(),
        }
    }
}

fn field_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    FieldText::deserialize(d).map(String::from)
}

fn opt_field_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    FieldText::deserialize(d).map(|t| Some(String::from(t)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_input_with_string_or_number_value() {
        let a: WidgetCommand = serde_json::from_str(r#"{"type":"input","field":"days","value":"45"}"#).unwrap();
        let b: WidgetCommand = serde_json::from_str(r#"{"type":"input","field":"days","value":45}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn set_with_missing_fields() {
        let cmd: WidgetCommand = serde_json::from_str(r#"{"type":"set","spending":"200"}"#).unwrap();
        assert_eq!(
            cmd,
            WidgetCommand::Set { days: None, spending: Some("200".into()), frequency: None }
        );
    }

    #[test]
    fn null_value_is_empty_text() {
        let cmd: WidgetCommand = serde_json::from_str(r#"{"type":"input","field":"frequency","value":null}"#).unwrap();
        assert_eq!(cmd, WidgetCommand::Input { field: InputField::Frequency, value: String::new() });
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(serde_json::from_str::<WidgetCommand>(r#"{"type":"explode"}"#).is_err());
    }
}

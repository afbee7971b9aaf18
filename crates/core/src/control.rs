//! Form control kinds and value coercion
//!
//! A payload value is written through the control's native representation:
//! text for text-like inputs, checked state for checkboxes and lone radios,
//! option selection for selects and radio groups.

use crate::payload::SettingValue;

/// How a named control holds its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    /// `value` is a string (text-like inputs, textarea, button, output)
    Text,
    /// Single checkbox, with its `value` attribute (`"on"` when absent)
    Checkbox { value: String },
    /// A radio button that is alone under its name
    Radio { value: String },
    /// Several controls sharing one name, at least one of them a radio
    RadioGroup,
    /// Several non-radio controls sharing one name, written one by one
    Shared { members: Vec<ControlKind> },
    Select { multiple: bool },
    /// File inputs only accept user selection
    File,
    /// Named elements without a value (fieldset, object)
    Unsupported,
}

/// A concrete write onto a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    SetValue(String),
    SetChecked(bool),
    SelectValues(Vec<String>),
    /// One write per member of a shared name, `None` leaves that member alone
    PerMember(Vec<Option<Assignment>>),
}

/// Parse the usual on/off spellings of a flag
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Some(true),
        "false" | "off" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Map a payload value onto a control, `None` when the control cannot take it
pub fn coerce(kind: &ControlKind, value: &SettingValue) -> Option<Assignment> {
    if matches!(value, SettingValue::Object(_)) {
        return None;
    }

    match kind {
        ControlKind::Text => value.as_text().map(Assignment::SetValue),
        ControlKind::Checkbox { value: own } | ControlKind::Radio { value: own } => {
            is_checked(own, value).map(Assignment::SetChecked)
        }
        ControlKind::RadioGroup | ControlKind::Select { multiple: false } => {
            first_text(value).map(Assignment::SetValue)
        }
        ControlKind::Select { multiple: true } => {
            let values = match value {
                SettingValue::Null => Vec::new(),
                SettingValue::List(items) => items
                    .iter()
                    .map(SettingValue::as_text)
                    .collect::<Option<Vec<_>>>()?,
                scalar => vec![scalar.as_text()?],
            };
            Some(Assignment::SelectValues(values))
        }
        ControlKind::Shared { members } => {
            let per_member: Vec<_> = members.iter().map(|member| coerce(member, value)).collect();
            if per_member.iter().all(Option::is_none) {
                None
            } else {
                Some(Assignment::PerMember(per_member))
            }
        }
        ControlKind::File | ControlKind::Unsupported => None,
    }
}

/// Strings that are neither the control's own value nor a flag are refused
fn is_checked(own: &str, value: &SettingValue) -> Option<bool> {
    match value {
        SettingValue::Bool(b) => Some(*b),
        SettingValue::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        SettingValue::String(s) if s == own => Some(true),
        SettingValue::String(s) => parse_flag(s),
        SettingValue::List(items) => Some(
            items
                .iter()
                .any(|item| item.as_text().as_deref() == Some(own)),
        ),
        SettingValue::Null => Some(false),
        SettingValue::Object(_) => None,
    }
}

/// Single-choice controls take the first element of a list
fn first_text(value: &SettingValue) -> Option<String> {
    match value {
        SettingValue::List(items) => items
            .first()
            .map_or_else(|| Some(String::new()), SettingValue::as_text),
        other => other.as_text(),
    }
}

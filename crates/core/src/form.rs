//! The settings form as a set of named controls
//!
//! `FormControls` is the seam between the populate logic and a concrete
//! document. The browser adapter lives in the ui crate; `MemoryForm` keeps
//! the same semantics in plain data for tests and headless callers.

use std::collections::HashSet;

use crate::control::{Assignment, ControlKind};
use crate::error::FormError;

/// Named controls of one form, resolved by exact name
pub trait FormControls {
    /// Kind of the control registered under `name`, if any
    fn control_kind(&self, name: &str) -> Option<ControlKind>;

    /// Write a coerced value onto the control named `name`
    fn assign(&mut self, name: &str, assignment: &Assignment) -> Result<(), FormError>;
}

impl<F: FormControls + ?Sized> FormControls for &mut F {
    fn control_kind(&self, name: &str) -> Option<ControlKind> {
        (**self).control_kind(name)
    }

    fn assign(&mut self, name: &str, assignment: &Assignment) -> Result<(), FormError> {
        (**self).assign(name, assignment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MemoryControl {
    Text(String),
    Checkbox { value: String, checked: bool },
    /// Radios sharing a name, `(value, checked)` in document order
    Radios(Vec<(String, bool)>),
    Select { options: Vec<(String, bool)>, multiple: bool },
    File,
    Unsupported,
    /// Non-radio controls sharing a name, in document order
    Shared(Vec<MemoryControl>),
}

/// In-memory form with browser-like write semantics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryForm {
    controls: Vec<(String, MemoryControl)>,
    failing: HashSet<String>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, name: &str, value: &str) -> Self {
        self.with(name, MemoryControl::Text(value.to_string()))
    }

    /// Checkbox with the default `value` attribute of `"on"`
    pub fn with_checkbox(self, name: &str, checked: bool) -> Self {
        self.with_checkbox_value(name, "on", checked)
    }

    pub fn with_checkbox_value(self, name: &str, value: &str, checked: bool) -> Self {
        self.with(
            name,
            MemoryControl::Checkbox {
                value: value.to_string(),
                checked,
            },
        )
    }

    /// Radios named `name` with the given values, none checked
    pub fn with_radio_group(self, name: &str, values: &[&str]) -> Self {
        let radios = values.iter().map(|v| ((*v).to_string(), false)).collect();
        self.with(name, MemoryControl::Radios(radios))
    }

    /// Select with the given option values; the first is selected unless `multiple`
    pub fn with_select(self, name: &str, options: &[&str], multiple: bool) -> Self {
        let options = options
            .iter()
            .enumerate()
            .map(|(i, v)| ((*v).to_string(), !multiple && i == 0))
            .collect();
        self.with(name, MemoryControl::Select { options, multiple })
    }

    pub fn with_file(self, name: &str) -> Self {
        self.with(name, MemoryControl::File)
    }

    pub fn with_fieldset(self, name: &str) -> Self {
        self.with(name, MemoryControl::Unsupported)
    }

    /// Several text inputs under one name
    pub fn with_shared_texts(self, name: &str, values: &[&str]) -> Self {
        let members = values
            .iter()
            .map(|v| MemoryControl::Text((*v).to_string()))
            .collect();
        self.with(name, MemoryControl::Shared(members))
    }

    /// Hidden input followed by a checkbox, the usual "always submit a value" pair
    pub fn with_hidden_checkbox(self, name: &str, hidden: &str, checked: bool) -> Self {
        let members = vec![
            MemoryControl::Text(hidden.to_string()),
            MemoryControl::Checkbox {
                value: "on".to_string(),
                checked,
            },
        ];
        self.with(name, MemoryControl::Shared(members))
    }

    /// Make every write to `name` fail, as a detached or locked element would
    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    fn with(mut self, name: &str, control: MemoryControl) -> Self {
        if let Some(slot) = self.controls.iter_mut().find(|(n, _)| n == name) {
            slot.1 = control;
        } else {
            self.controls.push((name.to_string(), control));
        }
        self
    }

    fn control(&self, name: &str) -> Option<&MemoryControl> {
        self.controls.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|(n, _)| n.as_str())
    }

    /// Current value as the control's `value` property would report it
    pub fn value(&self, name: &str) -> Option<String> {
        value_of(self.control(name)?)
    }

    /// Checked state of a checkbox or a lone radio
    pub fn checked(&self, name: &str) -> Option<bool> {
        checked_of(self.control(name)?)
    }

    /// `value` of each member of a shared name
    pub fn member_values(&self, name: &str) -> Option<Vec<Option<String>>> {
        match self.control(name)? {
            MemoryControl::Shared(members) => Some(members.iter().map(value_of).collect()),
            _ => None,
        }
    }

    /// Checked state of each member of a shared name, `None` for non-checkables
    pub fn member_checked(&self, name: &str) -> Option<Vec<Option<bool>>> {
        match self.control(name)? {
            MemoryControl::Shared(members) => Some(members.iter().map(checked_of).collect()),
            _ => None,
        }
    }

    /// Selected option values of a select
    pub fn selected(&self, name: &str) -> Option<Vec<String>> {
        match self.control(name)? {
            MemoryControl::Select { options, .. } => Some(
                options
                    .iter()
                    .filter(|(_, selected)| *selected)
                    .map(|(v, _)| v.clone())
                    .collect(),
            ),
            _ => None,
        }
    }

    fn control_mut(&mut self, name: &str) -> Option<&mut MemoryControl> {
        self.controls
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }
}

fn value_of(control: &MemoryControl) -> Option<String> {
    match control {
        MemoryControl::Text(v) | MemoryControl::Checkbox { value: v, .. } => Some(v.clone()),
        MemoryControl::Radios(radios) => Some(
            radios
                .iter()
                .find(|(_, checked)| *checked)
                .map(|(v, _)| v.clone())
                .unwrap_or_default(),
        ),
        MemoryControl::Select { options, .. } => Some(
            options
                .iter()
                .find(|(_, selected)| *selected)
                .map(|(v, _)| v.clone())
                .unwrap_or_default(),
        ),
        MemoryControl::File | MemoryControl::Unsupported | MemoryControl::Shared(_) => None,
    }
}

fn checked_of(control: &MemoryControl) -> Option<bool> {
    match control {
        MemoryControl::Checkbox { checked, .. } => Some(*checked),
        MemoryControl::Radios(radios) if radios.len() == 1 => Some(radios[0].1),
        _ => None,
    }
}

fn kind_of(control: &MemoryControl) -> ControlKind {
    match control {
        MemoryControl::Text(_) => ControlKind::Text,
        MemoryControl::Checkbox { value, .. } => ControlKind::Checkbox {
            value: value.clone(),
        },
        MemoryControl::Radios(radios) if radios.len() == 1 => ControlKind::Radio {
            value: radios[0].0.clone(),
        },
        MemoryControl::Radios(_) => ControlKind::RadioGroup,
        MemoryControl::Select { multiple, .. } => ControlKind::Select {
            multiple: *multiple,
        },
        MemoryControl::File => ControlKind::File,
        MemoryControl::Unsupported => ControlKind::Unsupported,
        MemoryControl::Shared(members) => ControlKind::Shared {
            members: members.iter().map(kind_of).collect(),
        },
    }
}

fn assign_control(control: &mut MemoryControl, assignment: &Assignment) -> Result<(), &'static str> {
    match (control, assignment) {
        (MemoryControl::Text(current), Assignment::SetValue(v)) => {
            current.clone_from(v);
        }
        (MemoryControl::Checkbox { checked, .. }, Assignment::SetChecked(on)) => {
            *checked = *on;
        }
        (MemoryControl::Radios(radios), Assignment::SetChecked(on)) if radios.len() == 1 => {
            radios[0].1 = *on;
        }
        (MemoryControl::Radios(radios), Assignment::SetValue(v)) => {
            // Only a matching radio changes the group, like RadioNodeList.value
            if radios.iter().any(|(value, _)| value == v) {
                for (value, checked) in radios.iter_mut() {
                    *checked = value == v;
                }
            }
        }
        (MemoryControl::Select { options, .. }, Assignment::SetValue(v)) => {
            let mut matched = false;
            for (value, selected) in options.iter_mut() {
                *selected = !matched && value == v;
                matched |= *selected;
            }
        }
        (MemoryControl::Select { options, .. }, Assignment::SelectValues(values)) => {
            for (value, selected) in options.iter_mut() {
                *selected = values.contains(value);
            }
        }
        (MemoryControl::Shared(members), Assignment::PerMember(writes)) => {
            if members.len() != writes.len() {
                return Err("shared name changed size");
            }
            for (member, write) in members.iter_mut().zip(writes) {
                if let Some(write) = write {
                    assign_control(member, write)?;
                }
            }
        }
        _ => return Err("assignment does not fit the control"),
    }
    Ok(())
}

impl FormControls for MemoryForm {
    fn control_kind(&self, name: &str) -> Option<ControlKind> {
        self.control(name).map(kind_of)
    }

    fn assign(&mut self, name: &str, assignment: &Assignment) -> Result<(), FormError> {
        let dom_error = |message: &str| FormError::Dom {
            name: name.to_string(),
            message: message.to_string(),
        };

        if self.failing.contains(name) {
            return Err(dom_error("element rejected the write"));
        }
        let control = self
            .control_mut(name)
            .ok_or_else(|| dom_error("no such control"))?;

        assign_control(control, assignment).map_err(dom_error)
    }
}

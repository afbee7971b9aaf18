use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Document, HtmlFormControlsCollection, HtmlFormElement, HtmlInputElement,
    HtmlOptionElement, HtmlSelectElement, HtmlTextAreaElement, Node, RadioNodeList,
};

use settings_form_core::{Assignment, ControlKind, FormControls, FormError};

/// Get document helper
pub fn get_document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// The settings form in the live document
///
/// Controls are resolved through `form.elements`, so a name shared by several
/// controls comes back as a `RadioNodeList`.
pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    /// Look up `#form_id`; anything but a `<form>` counts as missing
    pub fn find(form_id: &str) -> Result<Self, FormError> {
        get_document()
            .and_then(|doc| doc.get_element_by_id(form_id))
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            .map(|form| Self { form })
            .ok_or_else(|| FormError::MissingForm(form_id.to_string()))
    }

    fn named(&self, name: &str) -> Option<js_sys::Object> {
        self.form
            .elements()
            .dyn_into::<HtmlFormControlsCollection>()
            .ok()?
            .named_item(name)
    }
}

/// Members of a shared name, in document order
fn members(list: &RadioNodeList) -> Vec<Node> {
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

fn is_radio(node: &Node) -> bool {
    node.dyn_ref::<HtmlInputElement>()
        .is_some_and(|input| input.type_().eq_ignore_ascii_case("radio"))
}

fn element_kind(item: &JsValue) -> ControlKind {
    if let Some(input) = item.dyn_ref::<HtmlInputElement>() {
        match input.type_().to_ascii_lowercase().as_str() {
            "checkbox" => ControlKind::Checkbox { value: input.value() },
            "radio" => ControlKind::Radio { value: input.value() },
            "file" => ControlKind::File,
            _ => ControlKind::Text,
        }
    } else if let Some(select) = item.dyn_ref::<HtmlSelectElement>() {
        ControlKind::Select {
            multiple: select.multiple(),
        }
    } else if item.is_instance_of::<HtmlTextAreaElement>()
        || js_sys::Reflect::has(item, &"value".into()).unwrap_or(false)
    {
        // textarea, button, output
        ControlKind::Text
    } else {
        ControlKind::Unsupported
    }
}

fn assign_element(item: &JsValue, assignment: &Assignment) -> Result<(), String> {
    match assignment {
        Assignment::SetValue(value) => {
            if let Some(radios) = item.dyn_ref::<RadioNodeList>() {
                radios.set_value(value);
            } else if let Some(input) = item.dyn_ref::<HtmlInputElement>() {
                input.set_value(value);
            } else if let Some(select) = item.dyn_ref::<HtmlSelectElement>() {
                select.set_value(value);
            } else if let Some(area) = item.dyn_ref::<HtmlTextAreaElement>() {
                area.set_value(value);
            } else {
                js_sys::Reflect::set(item, &"value".into(), &JsValue::from_str(value))
                    .map_err(|e| format!("{e:?}"))?;
            }
        }
        Assignment::SetChecked(checked) => {
            let input = item
                .dyn_ref::<HtmlInputElement>()
                .ok_or("not a checkable input")?;
            input.set_checked(*checked);
        }
        Assignment::SelectValues(values) => {
            let select = item.dyn_ref::<HtmlSelectElement>().ok_or("not a select")?;
            for i in 0..select.length() {
                if let Some(option) = select
                    .item(i)
                    .and_then(|el| el.dyn_into::<HtmlOptionElement>().ok())
                {
                    option.set_selected(values.contains(&option.value()));
                }
            }
        }
        Assignment::PerMember(writes) => {
            let list = item
                .dyn_ref::<RadioNodeList>()
                .ok_or("name is not shared")?;
            let members = members(list);
            if members.len() != writes.len() {
                return Err("shared name changed size".to_string());
            }
            for (member, write) in members.iter().zip(writes) {
                if let Some(write) = write {
                    assign_element(member, write)?;
                }
            }
        }
    }
    Ok(())
}

impl FormControls for DomForm {
    fn control_kind(&self, name: &str) -> Option<ControlKind> {
        let item = self.named(name)?;

        let Some(list) = item.dyn_ref::<RadioNodeList>() else {
            return Some(element_kind(&item));
        };
        let members = members(list);
        // RadioNodeList.value only sees radios, anything else is written one by one
        let kind = if members.iter().any(is_radio) {
            ControlKind::RadioGroup
        } else {
            ControlKind::Shared {
                members: members.iter().map(|m| element_kind(m)).collect(),
            }
        };
        Some(kind)
    }

    fn assign(&mut self, name: &str, assignment: &Assignment) -> Result<(), FormError> {
        let dom_error = |message: String| FormError::Dom {
            name: name.to_string(),
            message,
        };
        let item = self
            .named(name)
            .ok_or_else(|| dom_error("no such control".to_string()))?;

        assign_element(&item, assignment).map_err(dom_error)
    }
}

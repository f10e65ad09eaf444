//! Dark mode switch component.

use dioxus::prelude::*;

use crate::app::theme::use_theme;

#[derive(Props, Clone, PartialEq)]
pub struct DarkModeToggleProps {
    /// Text shown next to the switch
    #[props(default = "Dark mode".to_string())]
    pub label: String,
}

/// Checkbox switch carrying the marker class the page bootstrap looks for.
#[component]
pub fn DarkModeToggle(props: DarkModeToggleProps) -> Element {
    let theme = use_theme();
    let is_dark = theme.get().is_dark();
    let switch_class = theme.switch_class();

    rsx! {
        label {
            input {
                r#type: "checkbox",
                role: "switch",
                class: "{switch_class}",
                checked: is_dark,
                onchange: move |_| theme.toggle(),
            }
            "{props.label}"
        }
    }
}

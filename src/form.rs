pub const FORM_SELECTOR: &str = ".contact-form";
pub const SUBMIT_SELECTOR: &str = ".btn-submit";
pub const FIELD_SELECTOR: &str = "input, textarea";
pub const SENDING_LABEL_HTML: &str = "Sending... <i class=\"fas fa-spinner fa-spin\"></i>";
pub const FIELD_LIFT_TRANSITION: &str = "transform 0.2s ease";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldFocus {
    Focused,
    Blurred,
}

impl FieldFocus {
    /// Transform applied to the field's wrapper.
    pub fn wrapper_transform(self) -> &'static str {
        match self {
            Self::Focused => "translateY(-1px)",
            Self::Blurred => "translateY(0)",
        }
    }
}

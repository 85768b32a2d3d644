use crate::form::FormState;

pub const VALIDATION_BANNER: &str = "Please fix the fields with errors, then resubmit";
pub const LOADING_STATUS: &str = "Loading pipeline…";
pub const CREATING_STATUS: &str = "Creating run…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Validation,
    Schema,
    Submit,
}

/// One message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub dismissible: bool,
}

/// Banners and a one-line status derived from a form snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    banners: Vec<Banner>,
    message: Option<String>,
}

impl StatusLine {
    pub fn from_state(state: &FormState) -> Self {
        let mut banners = Vec::new();
        if let Some(reason) = state.schema.unavailable_reason() {
            banners.push(Banner {
                kind: BannerKind::Schema,
                message: reason.to_string(),
                dismissible: false,
            });
        }
        if state.validation_failed {
            banners.push(Banner {
                kind: BannerKind::Validation,
                message: VALIDATION_BANNER.to_string(),
                dismissible: false,
            });
        }
        if let Some(error) = &state.submit_error {
            banners.push(Banner {
                kind: BannerKind::Submit,
                message: error.clone(),
                dismissible: true,
            });
        }
        let message = if state.creating {
            Some(CREATING_STATUS.to_string())
        } else if state.schema.is_loading() {
            Some(LOADING_STATUS.to_string())
        } else {
            None
        };
        Self { banners, message }
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn banner(&self, kind: BannerKind) -> Option<&Banner> {
        self.banners.iter().find(|banner| banner.kind == kind)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

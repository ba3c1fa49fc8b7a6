//! Page navigation rules.
//!
//! The form flow has two pages. A submission either moves the user to the
//! result page carrying the accepted text, or keeps them on the home page
//! with an error. The result page re-checks what it was given so a
//! hand-written result URL cannot display rejected text.

use crate::validate::Validator;
use crate::{InputMessage, Rejection, ValidationResult};

/// The two views of the form flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Result,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/index.html",
            Page::Result => "/result.html",
        }
    }
}

/// What the caller should do after handling a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Go to the result page and show `message`.
    ShowResult(InputMessage),
    /// Stay on the home page, render `error` and an empty input.
    StayWithError(Rejection),
    /// Go back to the home page without an error.
    ReturnHome,
}

/// Maps validation outcomes to page transitions.
#[derive(Clone, Debug)]
pub struct Navigator {
    validator: Validator,
}

impl Navigator {
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Handle a form submission from the home page.
    pub fn submit(&self, raw: &str) -> Transition {
        match self.validator.validate(raw) {
            ValidationResult::Accepted(msg) => Transition::ShowResult(msg),
            ValidationResult::Rejected(r) => Transition::StayWithError(r),
        }
    }

    /// Handle an arrival on the result page with whatever text it was passed.
    pub fn arrive_at_result(&self, carried: Option<&str>) -> Transition {
        let Some(raw) = carried else {
            return Transition::ReturnHome;
        };
        match self.validator.validate(raw) {
            ValidationResult::Accepted(msg) => Transition::ShowResult(msg),
            ValidationResult::Rejected(_) => Transition::ReturnHome,
        }
    }
}

//! Template loading and rendering using Tera.
//!
//! Follow-up messages live in `templates/messages/` and are embedded into the
//! binary, so a hook never depends on files in the project it runs in.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use tera::{Context, Tera};

/// CI hook message when at least one check failed.
pub const CI_FAILED: &str = "messages/ci_failed.tera";

/// CI hook message when checks are still running.
pub const CI_PENDING: &str = "messages/ci_pending.tera";

/// Test hook message asking for another round of fixes.
pub const TEST_LOOP: &str = "messages/test_loop.tera";

/// Embedded templates, by name.
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    (CI_FAILED, include_str!("../templates/messages/ci_failed.tera")),
    (CI_PENDING, include_str!("../templates/messages/ci_pending.tera")),
    (TEST_LOOP, include_str!("../templates/messages/test_loop.tera")),
];

/// Global template engine, built on first use.
static TERA: Lazy<std::result::Result<Tera, String>> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(EMBEDDED_TEMPLATES.iter().copied()).map_err(|e| e.to_string())?;
    Ok(tera)
});

/// Render a template with the given context.
///
/// The result is trimmed, so template files may end with a newline.
///
/// # Errors
///
/// Returns an error if the template doesn't exist or rendering fails.
pub fn render(name: &str, context: &Context) -> Result<String> {
    let tera = match &*TERA {
        Ok(tera) => tera,
        Err(e) => return Err(Error::Template(e.clone())),
    };
    let rendered = tera
        .render(name, context)
        .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))?;
    Ok(rendered.trim().to_string())
}

/// Get the list of all embedded template names.
#[must_use]
pub fn embedded_template_names() -> Vec<&'static str> {
    EMBEDDED_TEMPLATES.iter().map(|(name, _)| *name).collect()
}

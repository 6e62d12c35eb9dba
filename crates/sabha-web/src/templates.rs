//! Embedded Tera templates for the server-rendered pages.

use tera::{Context, Tera};

use crate::error::PageError;

const TEMPLATES: [(&str, &str); 2] = [
  ("layout.html", include_str!("../templates/layout.html")),
  ("new_session.html", include_str!("../templates/new_session.html")),
];

/// The compiled template set, built once at startup and shared read-only.
pub struct Templates {
  tera: Tera,
}

impl Templates {
  pub fn new() -> Result<Self, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    Ok(Self { tera })
  }

  pub fn render(&self, template: &str, context: &Context) -> Result<String, PageError> {
    Ok(self.tera.render(template, context)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn embedded_templates_compile() {
    let templates = Templates::new().unwrap();
    assert!(templates.tera.get_template("new_session.html").is_ok());
  }

  #[test]
  fn unknown_template_is_an_error() {
    let templates = Templates::new().unwrap();
    let err = templates.render("missing.html", &Context::new()).unwrap_err();
    assert!(matches!(err, PageError::Template(_)));
  }
}

//! Instruction templates with named placeholders.
//!
//! Templates are opaque text supplied by configuration. The only structure
//! the core relies on is the set of placeholders:
//!
//! | Placeholder | Substituted with |
//! |-------------|------------------|
//! | `{history}` | rendered conversation history |
//! | `{user_input}` | the current user utterance |
//! | `{format_instructions}` | the output contract description |
//! | `{context}` | the expert's knowledge context |
//!
//! Any other `{...}` sequence is left untouched.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    History,
    UserInput,
    FormatInstructions,
    Context,
}

impl Placeholder {
    pub const ALL: [Placeholder; 4] = [
        Placeholder::History,
        Placeholder::UserInput,
        Placeholder::FormatInstructions,
        Placeholder::Context,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::History => "history",
            Placeholder::UserInput => "user_input",
            Placeholder::FormatInstructions => "format_instructions",
            Placeholder::Context => "context",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template is missing the {0} placeholder")]
    MissingPlaceholder(Placeholder),

    #[error("template is empty")]
    Empty,
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptVars<'a> {
    pub history: &'a str,
    pub user_input: &'a str,
    pub format_instructions: &'a str,
    /// `None` leaves `{context}` untouched.
    pub context: Option<&'a str>,
}

impl PromptVars<'_> {
    fn value(&self, placeholder: Placeholder) -> Option<&str> {
        match placeholder {
            Placeholder::History => Some(self.history),
            Placeholder::UserInput => Some(self.user_input),
            Placeholder::FormatInstructions => Some(self.format_instructions),
            Placeholder::Context => self.context,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the template mentions the placeholder.
    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.text.contains(&placeholder.to_string())
    }

    /// Fail unless every required placeholder appears in the template.
    pub fn require(&self, required: &[Placeholder]) -> Result<(), TemplateError> {
        if self.text.trim().is_empty() {
            return Err(TemplateError::Empty);
        }
        match required.iter().find(|p| !self.contains(**p)) {
            Some(missing) => Err(TemplateError::MissingPlaceholder(*missing)),
            None => Ok(()),
        }
    }

    /// Substitute placeholders in a single pass.
    ///
    /// Substituted values are never rescanned, so a user input containing
    /// `{context}` stays literal.
    pub fn render(&self, vars: &PromptVars<'_>) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let substituted = after.find('}').and_then(|close| {
                let name = &after[..close];
                Placeholder::from_name(name)
                    .and_then(|p| vars.value(p))
                    .map(|value| (value, close))
            });

            match substituted {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl From<&str> for PromptTemplate {
    fn from(s: &str) -> Self {
        PromptTemplate::new(s)
    }
}

impl From<String> for PromptTemplate {
    fn from(s: String) -> Self {
        PromptTemplate::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>() -> PromptVars<'a> {
        PromptVars {
            history: "user: salut",
            user_input: "bonjour",
            format_instructions: "JSON please",
            context: Some("E-208: 51 kWh"),
        }
    }

    #[test]
    fn test_render_all_placeholders() {
        let t = PromptTemplate::new("H={history} U={user_input} F={format_instructions} C={context}");
        assert_eq!(
            t.render(&vars()),
            "H=user: salut U=bonjour F=JSON please C=E-208: 51 kWh"
        );
    }

    #[test]
    fn test_unknown_braces_left_alone() {
        let t = PromptTemplate::new(r#"{"response": "..."} {user_input} {unknown"#);
        assert_eq!(t.render(&vars()), r#"{"response": "..."} bonjour {unknown"#);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let t = PromptTemplate::new("{user_input}");
        let v = PromptVars {
            user_input: "what is {context}?",
            ..vars()
        };
        assert_eq!(t.render(&v), "what is {context}?");
    }

    #[test]
    fn test_missing_context_left_literal() {
        let t = PromptTemplate::new("{context}|{user_input}");
        let v = PromptVars {
            context: None,
            ..vars()
        };
        assert_eq!(t.render(&v), "{context}|bonjour");
    }

    #[test]
    fn test_require_reports_missing_placeholder() {
        let t = PromptTemplate::new("Answer {user_input}");
        assert!(t.require(&[Placeholder::UserInput]).is_ok());
        assert_eq!(
            t.require(&[Placeholder::UserInput, Placeholder::History]),
            Err(TemplateError::MissingPlaceholder(Placeholder::History))
        );
    }

    #[test]
    fn test_require_rejects_empty_template() {
        assert_eq!(PromptTemplate::new("  ").require(&[]), Err(TemplateError::Empty));
    }

    #[test]
    fn test_placeholder_display() {
        assert_eq!(Placeholder::FormatInstructions.to_string(), "{format_instructions}");
    }
}

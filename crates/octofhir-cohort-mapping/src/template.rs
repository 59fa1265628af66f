//! Positional template formatting
//!
//! Templates use `{n}` placeholders and message-format quoting: `''` renders a
//! single apostrophe and text between single apostrophes is copied verbatim,
//! so `'{'` renders a literal brace. A placeholder may carry a format suffix
//! (`{0,number}`); the suffix is ignored and the argument inserted as is.
//! Placeholders without a matching argument are kept literally.

/// Error raised for templates that cannot be formatted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unclosed placeholder starting at byte {position}")]
    UnclosedPlaceholder { position: usize },

    #[error("invalid placeholder '{{{placeholder}}}' at byte {position}")]
    InvalidPlaceholder { placeholder: String, position: usize },
}

/// Substitute `args` into `template` by position
pub fn format_template(template: &str, args: &[&str]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + args.iter().map(|a| a.len()).sum::<usize>());
    let mut chars = template.char_indices().peekable();
    let mut quoted = false;

    while let Some((position, ch)) = chars.next() {
        match ch {
            '\'' => {
                if matches!(chars.peek(), Some((_, '\''))) {
                    chars.next();
                    out.push('\'');
                } else {
                    quoted = !quoted;
                }
            }
            '{' if !quoted => {
                let mut placeholder = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => placeholder.push(c),
                        None => return Err(TemplateError::UnclosedPlaceholder { position }),
                    }
                }

                let index = placeholder
                    .split(',')
                    .next()
                    .map(str::trim)
                    .and_then(|s| s.parse::<usize>().ok())
                    .ok_or_else(|| TemplateError::InvalidPlaceholder {
                        placeholder: placeholder.clone(),
                        position,
                    })?;

                match args.get(index) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('{');
                        out.push_str(&placeholder);
                        out.push('}');
                    }
                }
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

/// Check that a template can be formatted, without substituting anything
pub fn validate_template(template: &str) -> Result<(), TemplateError> {
    format_template(template, &[]).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Code ''{3}'' from {1}", &["=", "Gender", "", "male"], "Code 'male' from Gender")]
    #[case("{0}{0}", &["a"], "aa")]
    #[case("exists (E G where G in '{'{0}'}')", &["x"], "exists (E G where G in {x})")]
    #[case("AgeInYears() between {3} and {4}", &["...", "", "", "10", "20"], "AgeInYears() between 10 and 20")]
    #[case("value {5} stays", &["a"], "value {5} stays")]
    #[case("'quoted {0}' {0}", &["v"], "quoted {0} v")]
    #[case("it''s", &[], "it's")]
    #[case("{0,number} items", &["3"], "3 items")]
    #[case("no placeholders", &[], "no placeholders")]
    fn test_format_template(#[case] template: &str, #[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(format_template(template, args).unwrap(), expected);
    }

    #[test]
    fn test_unclosed_placeholder() {
        let err = format_template("where X = {3", &["a"]).unwrap_err();
        assert_eq!(err, TemplateError::UnclosedPlaceholder { position: 10 });
    }

    #[test]
    fn test_non_numeric_placeholder() {
        let err = format_template("{value}", &["a"]).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidPlaceholder { .. }));
        assert!(validate_template("{value}").is_err());
        assert!(validate_template("{1} and {2}").is_ok());
    }
}

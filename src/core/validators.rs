use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::sync::LazyLock;

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;
/// Checks the entries of a multi-item answer such as an upload list.
pub type ItemsValidator = Box<dyn Fn(&[String]) -> Result<(), ValidationError> + Send + Sync>;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9(][0-9 ().-]{6,18}[0-9]$").expect("phone pattern")
});

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("date pattern")
});

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn min_length(min_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().chars().count() < min_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn max_length(max_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() > max_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Wraps `inner` so that an empty value passes; only filled-in values are checked.
pub fn optional(inner: Validator) -> Validator {
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Ok(())
        } else {
            inner(value)
        }
    })
}

pub fn email(message: impl Into<String>) -> Validator {
    matching(|value| EMAIL.is_match(value), message)
}

pub fn phone(message: impl Into<String>) -> Validator {
    matching(|value| PHONE.is_match(value), message)
}

pub fn iso_date(message: impl Into<String>) -> Validator {
    matching(|value| ISO_DATE.is_match(value), message)
}

/// Every file name must match one of `accept` (glob syntax,
/// case-insensitive).
pub fn file_types<I, S>(
    accept: I,
    message: impl Into<String>,
) -> Result<ItemsValidator, globset::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set = accepted_globs(accept)?;
    let message = message.into();
    Ok(Box::new(move |names: &[String]| {
        let rejected = names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .find(|name| !set.is_match(name));
        match rejected {
            Some(name) => Err(format!("{message}: {name}")),
            None => Ok(()),
        }
    }))
}

pub fn max_items(max: usize, message: impl Into<String>) -> ItemsValidator {
    let message = message.into();
    Box::new(move |items: &[String]| {
        let count = items.iter().filter(|item| !item.trim().is_empty()).count();
        if count > max {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

fn accepted_globs<I, S>(accept: I) -> Result<GlobSet, globset::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in accept {
        builder.add(
            GlobBuilder::new(pattern.as_ref())
                .case_insensitive(true)
                .build()?,
        );
    }
    builder.build()
}

fn matching(
    predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    message: impl Into<String>,
) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if predicate(value.trim()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_and_min_length_trim_whitespace() {
        assert_eq!(required("required")("  "), Err("required".to_string()));
        assert_eq!(min_length(3, "too short")(" ab "), Err("too short".to_string()));
        assert_eq!(min_length(3, "too short")("abc"), Ok(()));
    }

    #[test]
    fn email_and_phone_formats() {
        let email = email("bad email");
        assert!(email("clerk@hearings.example.gov").is_ok());
        assert!(email("clerk@").is_err());

        let phone = phone("bad phone");
        assert!(phone("(555) 123-4567").is_ok());
        assert!(phone("+1 555 123 4567").is_ok());
        assert!(phone("12").is_err());
    }

    #[test]
    fn optional_skips_empty_values() {
        let v = optional(email("bad email"));
        assert!(v("").is_ok());
        assert!(v("nope").is_err());
    }

    #[test]
    fn iso_date_rejects_bad_months() {
        let v = iso_date("bad date");
        assert!(v("2026-10-19").is_ok());
        assert!(v("2026-13-01").is_err());
        assert!(v("19/10/2026").is_err());
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn file_types_names_the_first_rejected_file() {
        let v = file_types(["*.pdf", "*.jpg"], "unsupported file").expect("globs");
        assert!(v(&names(&["brief.PDF", "photo.jpg"])).is_ok());
        assert_eq!(
            v(&names(&["brief.pdf", "notes.docx"])),
            Err("unsupported file: notes.docx".to_string())
        );
    }

    #[test]
    fn file_names_may_contain_commas() {
        let v = file_types(["*.pdf"], "unsupported file").expect("globs");
        assert!(v(&names(&["minutes, final.pdf"])).is_ok());
        assert!(max_items(1, "too many")(&names(&["minutes, final.pdf"])).is_ok());
        assert!(max_items(1, "too many")(&names(&["a.pdf", "b.pdf"])).is_err());
    }
}

//! News records and the submission types that produce them.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, date::normalize_date};

/// A persisted news item, as served by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
  /// Store-assigned, strictly increasing, never reused.
  pub id:        i64,
  pub title:     String,
  pub content:   String,
  /// Always `YYYY-MM-DD`.
  pub date:      String,
  /// Absolute URL of the attached image, or an empty string.
  pub image_url: String,
}

/// A fully-validated record ready to be inserted. The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNews {
  pub title:     String,
  pub content:   String,
  pub date:      String,
  pub image_url: String,
}

/// Raw text fields of a publish request, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsDraft {
  pub title:   Option<String>,
  pub content: Option<String>,
  /// Explicit display date; derived at publish time when absent.
  pub date:    Option<String>,
}

/// A draft whose required fields are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
  pub title:   String,
  pub content: String,
  pub date:    Option<String>,
}

impl NewsDraft {
  /// Reject missing or empty `title`/`content` and normalise a supplied date.
  ///
  /// Only emptiness is checked; whitespace-only text is accepted as-is.
  pub fn validate(self) -> Result<ValidDraft> {
    let title = non_empty(self.title).ok_or(Error::MissingField("title"))?;
    let content =
      non_empty(self.content).ok_or(Error::MissingField("content"))?;
    let date = non_empty(self.date)
      .map(|d| normalize_date(&d))
      .transpose()?;

    Ok(ValidDraft {
      title,
      content,
      date,
    })
  }
}

impl ValidDraft {
  /// Complete the record with the publish-time date (used only when no date
  /// was supplied) and the attachment URL.
  pub fn into_new_news(self, today: String, image_url: String) -> NewNews {
    NewNews {
      title: self.title,
      content: self.content,
      date: self.date.unwrap_or(today),
      image_url,
    }
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

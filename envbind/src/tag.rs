//! Parsing of per-field `#[env("...")]` annotations
//!
//! | Annotation         | Lookup key  | Absent or empty value |
//! |--------------------|-------------|-----------------------|
//! | *(none)*           | field name  | error                 |
//! | `"-"`              | *(ignored)* | *(ignored)*           |
//! | `"NAME"`           | `NAME`      | error                 |
//! | `"NAME,omitempty"` | `NAME`      | field left unchanged  |
//! | `",omitempty"`     | field name  | field left unchanged  |

/// Options parsed from a field annotation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagOptions<'a> {
    /// Skip the field entirely.
    pub ignored: bool,
    /// Leave the field unchanged when its variable is absent or empty.
    pub omit_empty: bool,
    /// Lookup key override. Empty means "use the field name".
    pub alias: &'a str,
}

impl<'a> TagOptions<'a> {
    /// Parse an annotation string.
    ///
    /// Options after the first comma other than `omitempty` are ignored.
    pub fn parse(tag: &'a str) -> Self {
        match tag {
            "" => Self::default(),
            "-" => Self {
                ignored: true,
                ..Self::default()
            },
            _ => {
                let mut segments = tag.split(',');
                let alias = segments.next().unwrap_or_default();
                Self {
                    ignored: false,
                    omit_empty: segments.any(|opt| opt == "omitempty"),
                    alias,
                }
            }
        }
    }

    /// The environment variable name to look up for a field called `field_name`.
    pub fn key<'b>(&self, field_name: &'b str) -> &'b str
    where
        'a: 'b,
    {
        if self.alias.is_empty() {
            field_name
        } else {
            self.alias
        }
    }
}

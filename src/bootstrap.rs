//! A small fluent builder for Bootstrap link buttons.
//!
//! ```
//! use blotter::bootstrap::{Button, ButtonSize, ButtonStyle};
//! use maud::{html, Render};
//!
//! let button = Button::link(html! { "Rust" }, "/tags/rust")
//!     .style(ButtonStyle::Info)
//!     .size(ButtonSize::Small)
//!     .class("tag-button");
//! assert_eq!(
//!     r#"<a class="btn btn-info btn-small tag-button" href="/tags/rust">Rust</a>"#,
//!     button.render().into_string(),
//! );
//! ```

use maud::{html, Markup, Render};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// The contextual style of a button. Names are matched case-insensitively,
/// both when parsed and when deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    Default,
    Primary,
    Info,
    Success,
    Warning,
    Danger,
    Inverse,
    Link,
}

impl ButtonStyle {
    const ALL: [ButtonStyle; 8] = [
        ButtonStyle::Default,
        ButtonStyle::Primary,
        ButtonStyle::Info,
        ButtonStyle::Success,
        ButtonStyle::Warning,
        ButtonStyle::Danger,
        ButtonStyle::Inverse,
        ButtonStyle::Link,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ButtonStyle::Default => "default",
            ButtonStyle::Primary => "primary",
            ButtonStyle::Info => "info",
            ButtonStyle::Success => "success",
            ButtonStyle::Warning => "warning",
            ButtonStyle::Danger => "danger",
            ButtonStyle::Inverse => "inverse",
            ButtonStyle::Link => "link",
        }
    }

    /// The CSS class for the style. The default style has none.
    fn class(self) -> Option<&'static str> {
        match self {
            ButtonStyle::Default => None,
            ButtonStyle::Primary => Some("btn-primary"),
            ButtonStyle::Info => Some("btn-info"),
            ButtonStyle::Success => Some("btn-success"),
            ButtonStyle::Warning => Some("btn-warning"),
            ButtonStyle::Danger => Some("btn-danger"),
            ButtonStyle::Inverse => Some("btn-inverse"),
            ButtonStyle::Link => Some("btn-link"),
        }
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        ButtonStyle::Default
    }
}

impl fmt::Display for ButtonStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ButtonStyle {
    type Err = UnknownStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ButtonStyle::ALL
            .iter()
            .copied()
            .find(|style| style.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStyleError(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for ButtonStyle {
    fn deserialize<D>(deserializer: D) -> Result<ButtonStyle, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse::<ButtonStyle>()
            .map_err(|e| D::Error::custom(format!("{}", e)))
    }
}

/// Returned when parsing a [`ButtonStyle`] from an unknown name.
#[derive(Debug, PartialEq)]
pub struct UnknownStyleError(String);

impl fmt::Display for UnknownStyleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown button style: {:?}", &self.0)
    }
}

impl std::error::Error for UnknownStyleError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonSize {
    Mini,
    Small,
    Large,
}

impl ButtonSize {
    fn class(self) -> &'static str {
        match self {
            ButtonSize::Mini => "btn-mini",
            ButtonSize::Small => "btn-small",
            ButtonSize::Large => "btn-large",
        }
    }
}

/// A link styled as a button. Construct one with [`Button::link`], configure
/// it with the chaining methods, and render it with [`Render::render`].
#[derive(Clone, Debug)]
pub struct Button<'a> {
    label: Markup,
    href: String,
    style: ButtonStyle,
    size: Option<ButtonSize>,
    classes: Vec<&'a str>,
}

impl<'a> Button<'a> {
    /// A button whose label is the already-rendered `label` and which links to
    /// `href`.
    pub fn link(label: Markup, href: impl Into<String>) -> Button<'a> {
        Button {
            label,
            href: href.into(),
            style: ButtonStyle::default(),
            size: None,
            classes: Vec::new(),
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Appends an extra CSS class. Classes render in the order they were
    /// added, after the button's own classes.
    pub fn class(mut self, class: &'a str) -> Self {
        self.classes.push(class);
        self
    }

    fn class_attr(&self) -> String {
        let mut classes: Vec<&str> = vec!["btn"];
        classes.extend(self.style.class());
        classes.extend(self.size.map(ButtonSize::class));
        classes.extend(self.classes.iter().copied());
        classes.join(" ")
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        html! {
            a class=(self.class_attr()) href=(self.href) { (self.label) }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_button() {
        assert_eq!(
            r#"<a class="btn" href="/x">x</a>"#,
            Button::link(html! { "x" }, "/x").render().into_string()
        );
    }

    #[test]
    fn test_class_order() {
        let button = Button::link(html! { "x" }, "/x")
            .class("first")
            .size(ButtonSize::Large)
            .class("second")
            .style(ButtonStyle::Danger);
        assert_eq!(
            r#"<a class="btn btn-danger btn-large first second" href="/x">x</a>"#,
            button.render().into_string()
        );
    }

    #[test]
    fn test_href_is_escaped() {
        assert_eq!(
            r#"<a class="btn" href="/a?b=1&amp;c=&quot;2&quot;">x</a>"#,
            Button::link(html! { "x" }, "/a?b=1&c=\"2\"")
                .render()
                .into_string()
        );
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!(Ok(ButtonStyle::Info), "info".parse());
        assert_eq!(Ok(ButtonStyle::Inverse), "Inverse".parse());
        assert_eq!(
            Err(UnknownStyleError(String::from("shiny"))),
            "shiny".parse::<ButtonStyle>()
        );
    }

    #[test]
    fn test_style_deserialize_matches_from_str() {
        for name in &["info", "Info", "INVERSE", "link"] {
            let parsed: ButtonStyle = name.parse().unwrap();
            let deserialized: ButtonStyle = serde_yaml::from_str(name).unwrap();
            assert_eq!(parsed, deserialized);
        }
        assert!(serde_yaml::from_str::<ButtonStyle>("shiny").is_err());
    }

    #[test]
    fn test_style_display_round_trips() {
        for style in ButtonStyle::ALL.iter() {
            assert_eq!(Ok(*style), style.to_string().parse());
        }
    }
}

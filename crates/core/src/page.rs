//! Stateless helpers over a small owned element tree.
//!
//! Forms the server renders (credentials, share links) are modelled as
//! [`PageElement`] trees so the lookup and visibility rules can be applied
//! without a browser.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// CSS class that removes an element from layout.
pub const HIDDEN_CLASS: &str = "hidden";

/// Name of the hidden input carrying the anti-forgery token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Header the server reads the anti-forgery token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";

const LABEL_ATTR: &str = "data-label";

//
// ─── CLASS LIST ────────────────────────────────────────────────────────────────
//

/// Ordered, duplicate-free set of CSS classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut list = Self::default();
        for class in raw.split_whitespace() {
            list.add(class);
        }
        list
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|existing| existing != class);
    }

    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|existing| existing == class)
    }

    /// Swaps `from` for `to`, keeping the other classes.
    pub fn replace(&mut self, from: &str, to: &str) {
        self.remove(from);
        self.add(to);
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

//
// ─── ELEMENTS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageElement {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub classes: ClassList,
    pub children: Vec<PageElement>,
}

impl PageElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// An `<input>` with the given `type`, `name` and `value`.
    pub fn input(kind: &str, name: &str, value: impl Into<String>) -> Self {
        Self::new("input")
            .with_attr("type", kind)
            .with_attr("name", name)
            .with_attr("value", value)
    }

    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_label(self, label: &str) -> Self {
        self.with_attr(LABEL_ATTR, label)
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.add(class);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: PageElement) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.attr(LABEL_ATTR)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    #[must_use]
    pub fn value(&self) -> &str {
        self.attr("value").unwrap_or_default()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.attrs.insert("value".to_string(), value.into());
    }

    #[must_use]
    pub fn is_input_of_type(&self, kind: &str) -> bool {
        self.tag.eq_ignore_ascii_case("input")
            && self
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case(kind))
    }
}

/// All elements below `root`, in document (pre-)order.
#[must_use]
pub fn descendants(root: &PageElement) -> Vec<&PageElement> {
    let mut out = Vec::new();
    collect_descendants(root, &mut out);
    out
}

fn collect_descendants<'a>(parent: &'a PageElement, acc: &mut Vec<&'a PageElement>) {
    for child in &parent.children {
        acc.push(child);
        collect_descendants(child, acc);
    }
}

/// Applies `f` to every element below `root`, in document order.
pub fn for_each_descendant_mut(root: &mut PageElement, f: &mut impl FnMut(&mut PageElement)) {
    for child in &mut root.children {
        f(child);
        for_each_descendant_mut(child, f);
    }
}

/// `root` and its descendants whose `data-label` equals `label`.
#[must_use]
pub fn elements_by_label<'a>(root: &'a PageElement, label: &str) -> Vec<&'a PageElement> {
    std::iter::once(root)
        .chain(descendants(root))
        .filter(|element| element.label() == Some(label))
        .collect()
}

//
// ─── VISIBILITY ────────────────────────────────────────────────────────────────
//

pub fn hide(element: &mut PageElement) {
    element.classes.add(HIDDEN_CLASS);
}

pub fn show(element: &mut PageElement) {
    element.classes.remove(HIDDEN_CLASS);
}

pub fn set_visible(element: &mut PageElement, visible: bool) {
    if visible {
        show(element);
    } else {
        hide(element);
    }
}

#[must_use]
pub fn is_hidden(element: &PageElement) -> bool {
    element.classes.contains(HIDDEN_CLASS)
}

/// Class to render on an element whose visibility is derived from state.
#[must_use]
pub fn visibility_class(visible: bool) -> &'static str {
    if visible { "" } else { HIDDEN_CLASS }
}

//
// ─── CSRF ──────────────────────────────────────────────────────────────────────
//

/// Anti-forgery token issued by the server with each form.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Blank tokens are treated as absent.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.trim().to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(..)")
    }
}

/// Value of the first hidden CSRF input inside `form`.
#[must_use]
pub fn csrf_token(form: &PageElement) -> Option<CsrfToken> {
    descendants(form)
        .into_iter()
        .find(|element| element.name() == Some(CSRF_FIELD))
        .and_then(|element| CsrfToken::new(element.value()))
}

//
// ─── CLIPBOARD ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Destination of copy actions.
pub trait Clipboard {
    /// # Errors
    ///
    /// Returns `ClipboardError` if the platform rejects the write.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies the value of an input (e.g. a share link) to the clipboard.
///
/// # Errors
///
/// Propagates the clipboard's failure.
pub fn copy_input_value(input: &PageElement, clipboard: &dyn Clipboard) -> Result<(), ClipboardError> {
    clipboard.write_text(input.value())
}

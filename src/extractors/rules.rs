// src/extractors/rules.rs
use scraper::{ElementRef, Html, Selector};

/// An ordered list of locators tried in sequence until one yields
/// non-empty text. The target markup changes over time and across
/// locales/experiments, so each field accumulates alternate locators
/// instead of relying on a single brittle one; first match wins.
pub struct FallbackChain {
    selectors: Vec<Selector>,
}

impl FallbackChain {
    /// Compiles a chain from a table of locator strings. A locator that
    /// fails to compile is dropped rather than poisoning the chain.
    pub fn new(locators: &[&str]) -> Self {
        let selectors = locators
            .iter()
            .filter_map(|loc| Selector::parse(loc).ok())
            .collect();
        Self { selectors }
    }

    /// Resolves the chain against the whole document.
    pub fn resolve(&self, document: &Html) -> Option<String> {
        self.selectors
            .iter()
            .find_map(|sel| document.select(sel).find_map(element_text))
    }

    /// Resolves the chain within an element subtree.
    pub fn resolve_in(&self, scope: ElementRef<'_>) -> Option<String> {
        self.selectors
            .iter()
            .find_map(|sel| scope.select(sel).find_map(element_text))
    }

    /// List form: the first locator that matches at least one non-empty
    /// element wins, and all of its matches are collected in document
    /// order.
    pub fn resolve_all_in(&self, scope: ElementRef<'_>) -> Vec<String> {
        for sel in &self.selectors {
            let found: Vec<String> = scope.select(sel).filter_map(element_text).collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }
}

/// Trimmed inner text of an element. Internal whitespace is kept as the
/// document author wrote it; an element with only whitespace content
/// counts as not found.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Locates a section's card container: find the anchor element carrying
/// the section's stable id, then climb to its closest enclosing card
/// wrapper. The section's content lives in a sibling subtree of the
/// anchor, not in the anchor itself.
pub fn section_card<'a>(
    document: &'a Html,
    anchor: &Selector,
    card: &Selector,
) -> Option<ElementRef<'a>> {
    let anchor_el = document.select(anchor).next()?;
    anchor_el
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| card.matches(el))
}

// src/extractors/profile.rs

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use super::rules::{element_text, section_card, FallbackChain};

// --- Locator tables (Lazy Static) ---
// Locators mirror the profile page's rendered markup. Several lean on
// presentation-class fragments (t-bold, t-14, hoverable-link-text); that
// is inherently fragile, which is exactly why each field is a fallback
// chain: a new markup variant becomes one more table entry, not new
// control flow.

static CARD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".artdeco-card").expect("Failed to compile CARD_SELECTOR")
});

static LIST_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("li.artdeco-list__item").expect("Failed to compile LIST_ITEM_SELECTOR")
});

// Date range and location share one span shape; they are told apart by
// position within the item.
static ENTRY_META_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"span.t-14.t-normal.t-black--light span[aria-hidden="true"]"#)
        .expect("Failed to compile ENTRY_META_SELECTOR")
});

static ABOUT_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#about").expect("Failed to compile ABOUT_ANCHOR"));

static EXPERIENCE_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#experience").expect("Failed to compile EXPERIENCE_ANCHOR"));

static EDUCATION_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#education").expect("Failed to compile EDUCATION_ANCHOR"));

static SKILLS_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#skills").expect("Failed to compile SKILLS_ANCHOR"));

static NAME_RULE: Lazy<FallbackChain> = Lazy::new(|| FallbackChain::new(&["h1"]));

static HEADLINE_RULE: Lazy<FallbackChain> =
    Lazy::new(|| FallbackChain::new(&[".text-body-medium.break-words"]));

static LOCATION_RULE: Lazy<FallbackChain> = Lazy::new(|| {
    FallbackChain::new(&[".text-body-small.inline.t-black--light.break-words"])
});

// Collapsed and expanded states of the expandable text block are equally
// valid locators; the aria-hidden span is a secondary nested locator for
// the same semantic text.
static ABOUT_RULE: Lazy<FallbackChain> = Lazy::new(|| {
    FallbackChain::new(&[
        ".inline-show-more-text--is-collapsed",
        ".inline-show-more-text--is-expanded",
        r#".inline-show-more-text span[aria-hidden="true"]"#,
    ])
});

static TITLE_RULE: Lazy<FallbackChain> =
    Lazy::new(|| FallbackChain::new(&[r#".mr1.t-bold span[aria-hidden="true"]"#]));

static COMPANY_RULE: Lazy<FallbackChain> =
    Lazy::new(|| FallbackChain::new(&[r#"span.t-14.t-normal span[aria-hidden="true"]"#]));

static SCHOOL_RULE: Lazy<FallbackChain> = Lazy::new(|| {
    FallbackChain::new(&[r#".mr1.hoverable-link-text span[aria-hidden="true"]"#])
});

static DEGREE_RULE: Lazy<FallbackChain> =
    Lazy::new(|| FallbackChain::new(&[r#"span.t-14.t-normal span[aria-hidden="true"]"#]));

static SKILL_LABEL_RULE: Lazy<FallbackChain> = Lazy::new(|| {
    FallbackChain::new(&[r#".mr1.hoverable-link-text span[aria-hidden="true"]"#])
});

// --- Data Structures ---

/// The normalized output record. Every field is always present when
/// serialized; markup that cannot be located degrades to an empty string
/// or an empty sequence, never to a missing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub about: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    #[serde(rename = "url")]
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub date_range: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
}

// --- Main Extractor Structure ---

/// Extracts a [`ProfileRecord`] from a rendered profile page.
///
/// Extraction never fails. The input markup is external and versioned
/// independently of this tool, so every rule degrades to an empty value
/// when its target is absent: partial data is more useful to the caller
/// than total failure when one section has drifted.
pub struct ProfileExtractor;

impl ProfileExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Parses the HTML and extracts in one synchronous pass.
    pub fn extract_html(&self, html: &str, source_url: &str) -> ProfileRecord {
        let document = Html::parse_document(html);
        self.extract(&document, source_url)
    }

    /// Applies every field rule against the document tree.
    pub fn extract(&self, document: &Html, source_url: &str) -> ProfileRecord {
        let record = ProfileRecord {
            name: NAME_RULE.resolve(document).unwrap_or_default(),
            headline: HEADLINE_RULE.resolve(document).unwrap_or_default(),
            location: LOCATION_RULE.resolve(document).unwrap_or_default(),
            about: self.extract_about(document),
            experience: self.extract_experience(document),
            education: self.extract_education(document),
            skills: self.extract_skills(document),
            source_url: source_url.to_string(),
        };

        tracing::debug!(
            "Extracted profile '{}': {} experience, {} education, {} skills",
            record.name,
            record.experience.len(),
            record.education.len(),
            record.skills.len()
        );

        record
    }

    fn extract_about(&self, document: &Html) -> String {
        let Some(card) = section_card(document, &ABOUT_ANCHOR, &CARD_SELECTOR) else {
            return String::new();
        };
        ABOUT_RULE.resolve_in(card).unwrap_or_default()
    }

    fn extract_experience(&self, document: &Html) -> Vec<ExperienceEntry> {
        let Some(card) = section_card(document, &EXPERIENCE_ANCHOR, &CARD_SELECTOR) else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        for item in card.select(&LIST_ITEM_SELECTOR) {
            // Title is the discriminator: an item without one is skipped
            // entirely, not emitted with empty fields.
            let Some(title) = TITLE_RULE.resolve_in(item) else {
                tracing::trace!("Skipping experience item without a title");
                continue;
            };

            let meta: Vec<String> = item
                .select(&ENTRY_META_SELECTOR)
                .filter_map(element_text)
                .collect();

            entries.push(ExperienceEntry {
                title,
                company: COMPANY_RULE.resolve_in(item).unwrap_or_default(),
                date_range: meta.first().cloned().unwrap_or_default(),
                location: meta.get(1).cloned().unwrap_or_default(),
            });
        }
        entries
    }

    fn extract_education(&self, document: &Html) -> Vec<EducationEntry> {
        let Some(card) = section_card(document, &EDUCATION_ANCHOR, &CARD_SELECTOR) else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        for item in card.select(&LIST_ITEM_SELECTOR) {
            // School is the discriminator, same rule as experience titles.
            let Some(school) = SCHOOL_RULE.resolve_in(item) else {
                tracing::trace!("Skipping education item without a school");
                continue;
            };

            entries.push(EducationEntry {
                school,
                degree: DEGREE_RULE.resolve_in(item).unwrap_or_default(),
            });
        }
        entries
    }

    fn extract_skills(&self, document: &Html) -> Vec<String> {
        let Some(card) = section_card(document, &SKILLS_ANCHOR, &CARD_SELECTOR) else {
            return Vec::new();
        };
        // No entry-level filtering: skills have no secondary sub-fields.
        SKILL_LABEL_RULE.resolve_all_in(card)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE_URL: &str = "https://www.linkedin.com/in/janedoe/";

    const FULL_PROFILE_HTML: &str = r#"
        <!DOCTYPE html>
        <html><head><title>Jane Doe | Profile</title></head><body>
        <main>
          <section class="artdeco-card">
            <h1>Jane Doe</h1>
            <div class="text-body-medium break-words">Systems Engineer at Example Corp</div>
            <span class="text-body-small inline t-black--light break-words">Berlin, Germany</span>
          </section>
          <section class="artdeco-card">
            <div id="about"></div>
            <div class="display-flex ph5 pv3">
              <div class="inline-show-more-text inline-show-more-text--is-collapsed">
                Ten years of building reliable backend systems.
              </div>
            </div>
          </section>
          <section class="artdeco-card">
            <div id="experience"></div>
            <ul>
              <li class="artdeco-list__item">
                <div class="display-flex align-items-center mr1 t-bold">
                  <span aria-hidden="true">Senior Engineer</span>
                </div>
                <span class="t-14 t-normal"><span aria-hidden="true">Example Corp</span></span>
                <span class="t-14 t-normal t-black--light"><span aria-hidden="true">Jan 2020 - Present</span></span>
                <span class="t-14 t-normal t-black--light"><span aria-hidden="true">Berlin, Germany</span></span>
              </li>
              <li class="artdeco-list__item">
                <span class="t-14 t-normal"><span aria-hidden="true">Ghost Corp</span></span>
              </li>
              <li class="artdeco-list__item">
                <div class="display-flex align-items-center mr1 t-bold">
                  <span aria-hidden="true">Engineer</span>
                </div>
                <span class="t-14 t-normal"><span aria-hidden="true">Startup GmbH</span></span>
                <span class="t-14 t-normal t-black--light"><span aria-hidden="true">2017 - 2019</span></span>
              </li>
            </ul>
          </section>
          <section class="artdeco-card">
            <div id="education"></div>
            <ul>
              <li class="artdeco-list__item">
                <div class="display-flex align-items-center mr1 hoverable-link-text">
                  <span aria-hidden="true">TU Berlin</span>
                </div>
                <span class="t-14 t-normal"><span aria-hidden="true">MSc Computer Science</span></span>
              </li>
            </ul>
          </section>
          <section class="artdeco-card">
            <div id="skills"></div>
            <ul>
              <li class="artdeco-list__item">
                <div class="display-flex align-items-center mr1 hoverable-link-text">
                  <span aria-hidden="true">Rust</span>
                </div>
              </li>
              <li class="artdeco-list__item">
                <div class="display-flex align-items-center mr1 hoverable-link-text">
                  <span aria-hidden="true">Distributed Systems</span>
                </div>
              </li>
            </ul>
          </section>
        </main>
        </body></html>
    "#;

    #[test]
    fn test_full_profile_extraction() {
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(FULL_PROFILE_HTML, SOURCE_URL);

        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.headline, "Systems Engineer at Example Corp");
        assert_eq!(record.location, "Berlin, Germany");
        assert_eq!(record.about, "Ten years of building reliable backend systems.");
        assert_eq!(record.source_url, SOURCE_URL);

        assert_eq!(record.experience.len(), 2, "item without title must be skipped");
        assert_eq!(record.experience[0].title, "Senior Engineer");
        assert_eq!(record.experience[0].company, "Example Corp");
        assert_eq!(record.experience[0].date_range, "Jan 2020 - Present");
        assert_eq!(record.experience[0].location, "Berlin, Germany");
        assert_eq!(record.experience[1].title, "Engineer");
        assert_eq!(record.experience[1].company, "Startup GmbH");
        assert_eq!(record.experience[1].date_range, "2017 - 2019");
        assert_eq!(record.experience[1].location, "");

        assert_eq!(record.education.len(), 1);
        assert_eq!(record.education[0].school, "TU Berlin");
        assert_eq!(record.education[0].degree, "MSc Computer Science");

        assert_eq!(record.skills, vec!["Rust", "Distributed Systems"]);
    }

    #[test]
    fn test_item_with_company_but_no_title_is_omitted() {
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(FULL_PROFILE_HTML, SOURCE_URL);
        assert!(record
            .experience
            .iter()
            .all(|entry| entry.company != "Ghost Corp"));
    }

    #[test]
    fn test_minimal_document_yields_complete_record() {
        let html = "<html><body><h1>Jane Doe</h1></body></html>";
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(html, SOURCE_URL);

        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.headline, "");
        assert_eq!(record.location, "");
        assert_eq!(record.about, "");
        assert!(record.experience.is_empty());
        assert!(record.education.is_empty());
        assert!(record.skills.is_empty());
        assert_eq!(record.source_url, SOURCE_URL);
    }

    #[test]
    fn test_missing_anchor_defaults_section_without_failing_others() {
        // No #experience anchor anywhere; the rest of the page is intact.
        let html = r#"
            <html><body>
            <h1>Jane Doe</h1>
            <section class="artdeco-card">
              <div id="skills"></div>
              <li class="artdeco-list__item">
                <div class="mr1 hoverable-link-text"><span aria-hidden="true">Rust</span></div>
              </li>
            </section>
            </body></html>
        "#;
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(html, SOURCE_URL);

        assert!(record.experience.is_empty());
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.skills, vec!["Rust"]);
    }

    #[test]
    fn test_skills_anchor_with_no_labels_yields_empty_list() {
        let html = r#"
            <html><body>
            <section class="artdeco-card"><div id="skills"></div><ul></ul></section>
            </body></html>
        "#;
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(html, SOURCE_URL);
        assert_eq!(record.skills, Vec::<String>::new());
    }

    #[test]
    fn test_anchor_outside_card_resolves_section_empty() {
        // Anchor present but no enclosing card wrapper.
        let html = r#"
            <html><body>
            <div id="about"></div>
            <div class="inline-show-more-text--is-collapsed">orphaned text</div>
            </body></html>
        "#;
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(html, SOURCE_URL);
        assert_eq!(record.about, "");
    }

    #[test]
    fn test_about_expanded_state_is_equally_valid() {
        let html = r#"
            <html><body>
            <section class="artdeco-card">
              <div id="about"></div>
              <div class="inline-show-more-text inline-show-more-text--is-expanded">
                The long form, fully expanded.
              </div>
            </section>
            </body></html>
        "#;
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(html, SOURCE_URL);
        assert_eq!(record.about, "The long form, fully expanded.");
    }

    #[test]
    fn test_about_nested_span_fallback() {
        let html = r#"
            <html><body>
            <section class="artdeco-card">
              <div id="about"></div>
              <div class="inline-show-more-text"><span aria-hidden="true">Fallback text</span></div>
            </section>
            </body></html>
        "#;
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(html, SOURCE_URL);
        assert_eq!(record.about, "Fallback text");
    }

    #[test]
    fn test_whitespace_only_name_resolves_empty() {
        let html = "<html><body><h1>   </h1></body></html>";
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(html, SOURCE_URL);
        assert_eq!(record.name, "");
    }

    #[test]
    fn test_internal_whitespace_is_preserved() {
        let html = "<html><body><section class=\"artdeco-card\">\
            <div id=\"about\"></div>\
            <div class=\"inline-show-more-text--is-collapsed\">  first line\nsecond line  </div>\
            </section></body></html>";
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(html, SOURCE_URL);
        assert_eq!(record.about, "first line\nsecond line");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let document = Html::parse_document(FULL_PROFILE_HTML);
        let extractor = ProfileExtractor::new();
        let first = extractor.extract(&document, SOURCE_URL);
        let second = extractor.extract(&document, SOURCE_URL);
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_round_trip_preserves_all_fields() {
        let extractor = ProfileExtractor::new();
        let record = extractor.extract_html(FULL_PROFILE_HTML, SOURCE_URL);

        let json = serde_json::to_string_pretty(&record).unwrap();
        assert!(json.contains("\"url\""), "source_url must serialize as 'url'");

        let parsed: ProfileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.skills, record.skills);
        assert_eq!(parsed.experience, record.experience);
    }
}

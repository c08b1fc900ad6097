//! Semantic validation of a normalized document.
//!
//! The grammar cannot express these constraints, so they are checked here
//! after normalization:
//!
//! - **Entity name uniqueness**: within one scope (the document root or a
//!   package body) every entity name may be declared once.
//! - **Greeting cardinality**: within one scope every person may be greeted
//!   once.
//! - **Person capitalization**: person names should start with an
//!   upper-case letter (warning only; can be disabled).
//!
//! Checks only look at names and reference text. A dangling reference does
//! not hide a duplicate, and nothing here ever fails: a clean document
//! yields an empty list.

use std::{collections::HashMap, hash::Hash};

use log::{debug, info};

use crate::{
    ast::{Entity, Greeting, PackageDeclaration, Person},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    normalize::{Located, NormalizedModel},
};

/// Producer name attached to every diagnostic raised here.
const SOURCE: &str = "masala";

/// Options for [`validate_with`].
#[derive(Debug, Clone, Copy)]
pub struct ValidateConfig {
    capitalized_person_names: bool,
}

impl ValidateConfig {
    /// # Arguments
    ///
    /// * `capitalized_person_names` - Warn about person names that do not
    ///   start with an upper-case letter.
    pub fn new(capitalized_person_names: bool) -> Self {
        Self {
            capitalized_person_names,
        }
    }

    pub fn capitalized_person_names(&self) -> bool {
        self.capitalized_person_names
    }
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Visitor over the scopes of a normalized document.
///
/// The default implementations walk every scope depth-first in source
/// order, so implementors override only the buckets they care about.
pub trait Visitor<'a> {
    /// Visit one scope and then every package nested in it.
    fn visit_model(&mut self, model: &NormalizedModel<'a>) {
        self.visit_entities(&model.entities);
        self.visit_greetings(&model.greetings);
        self.visit_persons(&model.persons);
        for package in &model.packages {
            self.visit_package(model, package);
        }
    }

    /// Visit a package by normalizing its body as a scope of its own.
    fn visit_package(
        &mut self,
        parent: &NormalizedModel<'a>,
        package: &Located<'a, PackageDeclaration>,
    ) {
        self.visit_model(&parent.package_scope(package));
    }

    /// Visit the entities of one scope
    fn visit_entities(&mut self, _entities: &[Located<'a, Entity>]) {}

    /// Visit the greetings of one scope
    fn visit_greetings(&mut self, _greetings: &[Located<'a, Greeting>]) {}

    /// Visit the persons of one scope
    fn visit_persons(&mut self, _persons: &[Located<'a, Person>]) {}
}

/// Validator that collects every semantic violation in a document.
pub struct Validator {
    config: ValidateConfig,
    diagnostics: DiagnosticCollector,
}

impl Validator {
    pub fn new(config: ValidateConfig) -> Self {
        Self {
            config,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Returns `true` once an error-severity violation has been reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Consume the validator, returning the collected diagnostics.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics.finish()
    }
}

impl<'a> Visitor<'a> for Validator {
    fn visit_entities(&mut self, entities: &[Located<'a, Entity>]) {
        for (entity, occurrence) in count_repeats(entities, |e| e.name()) {
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "Entity has non-unique name '{}' ({} occurrence).",
                    entity.name(),
                    ordinal(occurrence)
                ))
                .with_code(ErrorCode::E200)
                .with_node(entity.path().clone())
                .with_source(SOURCE)
                .with_help("rename the entity or remove the duplicate declaration"),
            );
        }
    }

    fn visit_greetings(&mut self, greetings: &[Located<'a, Greeting>]) {
        // A reference with neither text nor path names no one, so it cannot
        // repeat anything.
        let keyed: Vec<_> = greetings
            .iter()
            .filter_map(|greeting| greeting.person().key().map(|key| (greeting, key)))
            .collect();

        for ((greeting, key), occurrence) in count_repeats(&keyed, |(_, key)| key.clone()) {
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "You can greet each person only once. This is the {} greeting to '{key}'.",
                    ordinal(occurrence),
                ))
                .with_code(ErrorCode::E201)
                .with_node(greeting.path().clone())
                .with_source(SOURCE),
            );
        }
    }

    fn visit_persons(&mut self, persons: &[Located<'a, Person>]) {
        if !self.config.capitalized_person_names() {
            return;
        }

        for person in persons {
            let capitalized = person
                .name()
                .first_char()
                .is_some_and(|c| c.to_uppercase().eq(std::iter::once(c)));
            if !capitalized {
                self.diagnostics.emit(
                    Diagnostic::warning("Person name should start with a capital.")
                        .with_code(ErrorCode::W200)
                        .with_node(person.path().clone())
                        .with_source(SOURCE),
                );
            }
        }
    }
}

/// Validate a normalized document with the default configuration.
pub fn validate(model: &NormalizedModel<'_>) -> Vec<Diagnostic> {
    validate_with(model, ValidateConfig::default())
}

/// Validate a normalized document.
pub fn validate_with(model: &NormalizedModel<'_>, config: ValidateConfig) -> Vec<Diagnostic> {
    info!("Validating document");
    let mut validator = Validator::new(config);
    validator.visit_model(model);
    let has_errors = validator.has_errors();
    let diagnostics = validator.finish();
    debug!(diagnostics_len = diagnostics.len(), has_errors; "Validation finished");
    diagnostics
}

/// Count occurrences of a key across a sequence, yielding every item after
/// the first for its key together with its 1-based occurrence number.
pub fn count_repeats<'i, T, K, F>(items: &'i [T], key: F) -> impl Iterator<Item = (&'i T, usize)>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen: HashMap<K, usize> = HashMap::new();
    items.iter().filter_map(move |item| {
        let count = seen.entry(key(item)).or_insert(0);
        *count += 1;
        (*count > 1).then_some((item, *count))
    })
}

/// Format an occurrence number.
///
/// Only `2` gets its English suffix; everything else is `<n>th`
/// (so `3th`, `21th`). Kept as-is: diagnostics consumers match on it.
pub fn ordinal(n: usize) -> String {
    match n {
        2 => "2nd".to_string(),
        n => format!("{n}th"),
    }
}

#[cfg(test)]
mod tests {
    use masala_core::identifier::Id;

    use super::*;
    use crate::{
        ast::{Document, Element},
        error::Severity,
        normalize::normalize,
        reference::CrossRef,
    };

    fn entity(name: &str) -> Element {
        Element::Entity(Entity::new(Id::new(name), Vec::new(), None))
    }

    fn greeting(target: &str) -> Element {
        Element::Greeting(Greeting::new(CrossRef::dangling(target)))
    }

    fn person(name: &str) -> Element {
        Element::Person(Person::new(Id::new(name)))
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22th");
    }

    #[test]
    fn test_count_repeats() {
        let items = ["a", "b", "a", "a", "b"];
        let repeats: Vec<_> = count_repeats(&items, |s| *s)
            .map(|(item, n)| (*item, n))
            .collect();
        assert_eq!(repeats, [("a", 2), ("a", 3), ("b", 2)]);
    }

    #[test]
    fn test_clean_document_has_no_diagnostics() {
        let document = Document::new(vec![entity("User"), entity("Order"), person("Alice")]);
        assert!(validate(&normalize(&document)).is_empty());
    }

    #[test]
    fn test_duplicate_entity_reported_on_later_occurrence() {
        let document = Document::new(vec![entity("User"), entity("Order"), entity("User")]);
        let diagnostics = validate(&normalize(&document));

        assert_eq!(diagnostics.len(), 1);
        let diag = &diagnostics[0];
        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.error_code(), Some(ErrorCode::E200));
        assert_eq!(
            diag.message(),
            "Entity has non-unique name 'User' (2nd occurrence)."
        );
        assert_eq!(
            diag.target().and_then(|t| t.node()).unwrap().to_string(),
            "/elements@2"
        );
    }

    #[test]
    fn test_repeated_greetings() {
        let document = Document::new(vec![
            greeting("A"),
            greeting("B"),
            greeting("A"),
            greeting("A"),
        ]);
        let diagnostics = validate(&normalize(&document));

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics[0].message(),
            "You can greet each person only once. This is the 2nd greeting to 'A'."
        );
        assert_eq!(
            diagnostics[1].message(),
            "You can greet each person only once. This is the 3th greeting to 'A'."
        );

        let targets: Vec<_> = diagnostics
            .iter()
            .map(|d| d.target().unwrap().to_string())
            .collect();
        assert_eq!(targets, ["/elements@2", "/elements@3"]);
    }

    #[test]
    fn test_greetings_without_any_target_are_not_counted() {
        let nameless = || {
            let person: CrossRef = serde_json::from_str(r#"{"$error": "x"}"#).unwrap();
            Element::Greeting(Greeting::new(person))
        };
        let document = Document::new(vec![nameless(), nameless(), greeting("A")]);

        assert!(validate(&normalize(&document)).is_empty());
    }

    #[test]
    fn test_validator_tracks_errors() {
        let document = Document::new(vec![person("alice")]);
        let mut validator = Validator::new(ValidateConfig::default());
        validator.visit_model(&normalize(&document));
        assert!(!validator.has_errors());

        let document = Document::new(vec![entity("User"), entity("User")]);
        validator.visit_model(&normalize(&document));
        assert!(validator.has_errors());
        assert_eq!(validator.finish().len(), 2);
    }

    #[test]
    fn test_lowercase_person_warns() {
        let document = Document::new(vec![person("alice"), person("Bob")]);
        let diagnostics = validate(&normalize(&document));

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity().is_warning());
        assert_eq!(diagnostics[0].error_code(), Some(ErrorCode::W200));
    }

    #[test]
    fn test_capitalization_check_can_be_disabled() {
        let document = Document::new(vec![person("alice")]);
        let diagnostics = validate_with(&normalize(&document), ValidateConfig::new(false));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_names_are_scoped_per_package() {
        let document = Document::new(vec![
            entity("User"),
            Element::PackageDeclaration(PackageDeclaration::new(
                Id::new("admin"),
                vec![entity("User"), entity("User")],
            )),
        ]);
        let diagnostics = validate(&normalize(&document));

        // The top-level User and the first packaged User live in different scopes.
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].target().unwrap().to_string(),
            "/elements@1/elements@1"
        );
    }
}

use crate::collection::Document;
use crate::common::constants::DOC_ID;
use crate::errors::{ErrorKind, SedimentError, SedimentResult};
use crate::pipeline::Expr;
use indexmap::IndexMap;

/// The treatment of one output field in a [ProjectSpec].
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectField {
    /// Copies the field from the source document when present.
    Include,
    /// Drops the field from the output.
    Exclude,
    /// Computes the field from an expression; undefined results are skipped.
    Expr(Expr),
}

/// An ordered projection specification.
///
/// A projection runs in one of two modes. Inclusion mode builds the output
/// from the named fields only, with `_id` carried over unless explicitly
/// excluded. Exclusion mode copies the whole document minus the named
/// fields. Expression fields count as inclusions; mixing inclusion and
/// exclusion on fields other than `_id` is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSpec {
    fields: IndexMap<String, ProjectField>,
}

impl ProjectSpec {
    /// Creates an empty projection.
    pub fn new() -> Self {
        ProjectSpec {
            fields: IndexMap::new(),
        }
    }

    /// Includes a source field in the output.
    pub fn include(mut self, path: &str) -> Self {
        self.fields
            .insert(path.to_string(), ProjectField::Include);
        self
    }

    /// Excludes a field from the output.
    pub fn exclude(mut self, path: &str) -> Self {
        self.fields
            .insert(path.to_string(), ProjectField::Exclude);
        self
    }

    /// Computes an output field from an expression.
    ///
    /// Renames are expressed as `compute("new name", Expr::field("old"))`.
    pub fn compute(mut self, name: &str, expr: Expr) -> Self {
        self.fields
            .insert(name.to_string(), ProjectField::Expr(expr));
        self
    }

    fn inclusion_mode(&self) -> SedimentResult<bool> {
        let mut includes = false;
        let mut excludes = false;
        for (name, field) in &self.fields {
            match field {
                ProjectField::Include | ProjectField::Expr(_) => includes = true,
                ProjectField::Exclude => {
                    if name != DOC_ID {
                        excludes = true;
                    }
                }
            }
        }
        if includes && excludes {
            log::error!("projection mixes inclusion and exclusion");
            return Err(SedimentError::new(
                "projection cannot mix inclusion and exclusion",
                ErrorKind::InvalidProjection,
            ));
        }
        Ok(includes)
    }

    pub(crate) fn validate(&self) -> SedimentResult<()> {
        self.inclusion_mode().map(|_| ())
    }

    pub(crate) fn project(&self, doc: &Document) -> SedimentResult<Document> {
        if self.inclusion_mode()? {
            self.project_inclusive(doc)
        } else {
            self.project_exclusive(doc)
        }
    }

    fn project_inclusive(&self, doc: &Document) -> SedimentResult<Document> {
        let mut projected = Document::new();
        let id_excluded = matches!(self.fields.get(DOC_ID), Some(ProjectField::Exclude));
        if !id_excluded {
            if let Some(id) = doc.lookup(DOC_ID)? {
                projected.put(DOC_ID, id)?;
            }
        }
        for (name, field) in &self.fields {
            match field {
                ProjectField::Include => {
                    if let Some(value) = doc.lookup(name)? {
                        projected.put(name.as_str(), value)?;
                    }
                }
                ProjectField::Expr(expr) => {
                    if let Some(value) = expr.evaluate(doc)? {
                        projected.put(name.as_str(), value)?;
                    }
                }
                ProjectField::Exclude => {}
            }
        }
        Ok(projected)
    }

    fn project_exclusive(&self, doc: &Document) -> SedimentResult<Document> {
        let mut projected = doc.clone();
        for (name, field) in &self.fields {
            if matches!(field, ProjectField::Exclude) {
                projected.remove(name)?;
            }
        }
        Ok(projected)
    }
}

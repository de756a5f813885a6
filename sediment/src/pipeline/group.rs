use crate::collection::Document;
use crate::common::constants::DOC_ID;
use crate::common::Value;
use crate::errors::SedimentResult;
use crate::pipeline::Expr;
use indexmap::IndexMap;

/// An accumulator folding one value per input document into a group result.
#[derive(Debug, Clone, PartialEq)]
pub enum Accumulator {
    /// Numeric sum; non-numeric and undefined inputs are ignored, so
    /// `Sum(Expr::literal(1))` counts documents.
    Sum(Expr),
    /// Largest seen value; undefined inputs are ignored.
    Max(Expr),
    /// Smallest seen value; undefined inputs are ignored.
    Min(Expr),
    /// Collects values into an array; undefined inputs are skipped,
    /// explicit nulls are kept.
    Push(Expr),
}

/// A grouping specification: a key expression plus named accumulators.
///
/// Groups are keyed by deep equality of the evaluated key; an undefined key
/// groups under `Null`. Output groups appear in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    id: Option<Expr>,
    fields: IndexMap<String, Accumulator>,
}

impl GroupSpec {
    /// Creates a grouping keyed by an expression.
    pub fn by(id: Expr) -> Self {
        GroupSpec {
            id: Some(id),
            fields: IndexMap::new(),
        }
    }

    /// Creates a grouping that folds every document into a single group
    /// whose emitted `_id` is `Null`.
    pub fn global() -> Self {
        GroupSpec {
            id: None,
            fields: IndexMap::new(),
        }
    }

    /// Adds a sum accumulator under the given output field.
    pub fn sum(mut self, name: &str, expr: Expr) -> Self {
        self.fields.insert(name.to_string(), Accumulator::Sum(expr));
        self
    }

    /// Adds a max accumulator under the given output field.
    pub fn max(mut self, name: &str, expr: Expr) -> Self {
        self.fields.insert(name.to_string(), Accumulator::Max(expr));
        self
    }

    /// Adds a min accumulator under the given output field.
    pub fn min(mut self, name: &str, expr: Expr) -> Self {
        self.fields.insert(name.to_string(), Accumulator::Min(expr));
        self
    }

    /// Adds a push accumulator under the given output field.
    pub fn push(mut self, name: &str, expr: Expr) -> Self {
        self.fields.insert(name.to_string(), Accumulator::Push(expr));
        self
    }

    pub(crate) fn execute(&self, docs: Vec<Document>) -> SedimentResult<Vec<Document>> {
        let mut groups: IndexMap<Value, Vec<AccState>> = IndexMap::new();
        for doc in docs {
            let key = match &self.id {
                Some(expr) => expr.evaluate(&doc)?.unwrap_or(Value::Null),
                None => Value::Null,
            };
            let states = groups.entry(key).or_insert_with(|| {
                self.fields
                    .values()
                    .map(AccState::initial)
                    .collect()
            });
            for (accumulator, state) in self.fields.values().zip(states.iter_mut()) {
                state.fold(accumulator, &doc)?;
            }
        }

        let mut out = Vec::with_capacity(groups.len());
        for (key, states) in groups {
            let mut group_doc = Document::new();
            group_doc.put(DOC_ID, key)?;
            for (name, state) in self.fields.keys().zip(states) {
                group_doc.put(name.as_str(), state.finish())?;
            }
            out.push(group_doc);
        }
        Ok(out)
    }
}

enum AccState {
    Sum { int: i64, float: f64, promoted: bool },
    Extreme(Option<Value>),
    Pushed(Vec<Value>),
}

impl AccState {
    fn initial(accumulator: &Accumulator) -> Self {
        match accumulator {
            Accumulator::Sum(_) => AccState::Sum {
                int: 0,
                float: 0.0,
                promoted: false,
            },
            Accumulator::Max(_) | Accumulator::Min(_) => AccState::Extreme(None),
            Accumulator::Push(_) => AccState::Pushed(Vec::new()),
        }
    }

    fn fold(&mut self, accumulator: &Accumulator, doc: &Document) -> SedimentResult<()> {
        match (accumulator, self) {
            (Accumulator::Sum(expr), AccState::Sum { int, float, promoted }) => {
                match expr.evaluate(doc)? {
                    Some(Value::F64(f)) => {
                        *float += f;
                        *promoted = true;
                    }
                    Some(value) => {
                        if let Some(i) = value.as_integer() {
                            *int += i;
                        }
                    }
                    None => {}
                }
            }
            (Accumulator::Max(expr), AccState::Extreme(best)) => {
                if let Some(value) = expr.evaluate(doc)? {
                    if best.as_ref().map_or(true, |b| value > *b) {
                        *best = Some(value);
                    }
                }
            }
            (Accumulator::Min(expr), AccState::Extreme(best)) => {
                if let Some(value) = expr.evaluate(doc)? {
                    if best.as_ref().map_or(true, |b| value < *b) {
                        *best = Some(value);
                    }
                }
            }
            (Accumulator::Push(expr), AccState::Pushed(values)) => {
                if let Some(value) = expr.evaluate(doc)? {
                    values.push(value);
                }
            }
            _ => unreachable!("accumulator state mismatch"),
        }
        Ok(())
    }

    fn finish(self) -> Value {
        match self {
            AccState::Sum { int, float, promoted } => {
                if promoted {
                    Value::F64(int as f64 + float)
                } else {
                    Value::I64(int)
                }
            }
            AccState::Extreme(best) => best.unwrap_or(Value::Null),
            AccState::Pushed(values) => Value::Array(values),
        }
    }
}

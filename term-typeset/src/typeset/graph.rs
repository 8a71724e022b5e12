//! Type graph: the registry of semantic types, their containment tree and
//! the relation edges between them.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use crate::column::Column;
use crate::error::{Result, TypesetError};
use crate::logging::LogConfig;
use crate::typeset::relation::Relation;
use crate::typeset::semantic::SemanticType;
use crate::{log_coercion, log_step};

/// Validated registry of semantic types and relations.
///
/// Types and relations keep their declaration order. Every relation is
/// guarded by its source type's `contains` once registered.
#[derive(Debug)]
pub struct TypeGraph {
    types: Vec<SemanticType>,
    index: HashMap<String, usize>,
    root: usize,
    children: Vec<Vec<usize>>,
    relations: Vec<Relation>,
    /// Target type of each relation, parallel to `relations`.
    targets: Vec<usize>,
    /// Outgoing relation indices per source type.
    outgoing: Vec<Vec<usize>>,
}

/// Outcome of a graph search.
#[derive(Debug, Clone)]
pub(crate) struct SearchHit {
    pub type_idx: usize,
    pub column: Column,
    /// Type indices from the seed to `type_idx`.
    pub path: Vec<usize>,
    pub cost: u32,
}

struct SearchState {
    type_idx: usize,
    column: Column,
    path: Vec<usize>,
    cost: u32,
}

impl TypeGraph {
    /// Validates and indexes the given types and relations.
    pub fn new(types: Vec<SemanticType>, relations: Vec<Relation>) -> Result<Self> {
        let mut index = HashMap::with_capacity(types.len());
        for (i, ty) in types.iter().enumerate() {
            if index.insert(ty.name().to_string(), i).is_some() {
                return Err(TypesetError::DuplicateType(ty.name().to_string()));
            }
        }

        let roots: Vec<usize> = types
            .iter()
            .enumerate()
            .filter(|(_, ty)| ty.is_catch_all())
            .map(|(i, _)| i)
            .collect();
        let root = match roots.as_slice() {
            [root] => *root,
            [] => return Err(TypesetError::invalid_graph("no catch-all root type")),
            _ => {
                let names: Vec<&str> = roots.iter().map(|&i| types[i].name()).collect();
                return Err(TypesetError::invalid_graph(format!(
                    "more than one catch-all root type: {}",
                    names.join(", ")
                )));
            }
        };

        let mut children = vec![Vec::new(); types.len()];
        for (i, ty) in types.iter().enumerate() {
            if let Some(parent) = ty.parent() {
                let parent_idx = *index
                    .get(parent)
                    .ok_or_else(|| TypesetError::UnknownType(parent.to_string()))?;
                children[parent_idx].push(i);
            }
        }

        // Parent links that loop never reach the root.
        let mut reachable = HashSet::with_capacity(types.len());
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            if reachable.insert(current) {
                queue.extend(children[current].iter().copied());
            }
        }
        if let Some(orphan) = (0..types.len()).find(|i| !reachable.contains(i)) {
            return Err(TypesetError::invalid_graph(format!(
                "type {} is not reachable from the root {}",
                types[orphan].name(),
                types[root].name()
            )));
        }

        let mut guarded = Vec::with_capacity(relations.len());
        let mut targets = Vec::with_capacity(relations.len());
        let mut outgoing = vec![Vec::new(); types.len()];
        let mut pairs = HashSet::with_capacity(relations.len());
        for relation in relations {
            let source = *index
                .get(relation.source())
                .ok_or_else(|| TypesetError::UnknownType(relation.source().to_string()))?;
            let target = *index
                .get(relation.target())
                .ok_or_else(|| TypesetError::UnknownType(relation.target().to_string()))?;
            if source == target {
                return Err(TypesetError::invalid_graph(format!(
                    "relation {relation} is a self-loop"
                )));
            }
            if !pairs.insert((source, target)) {
                return Err(TypesetError::invalid_graph(format!(
                    "relation {relation} is registered twice"
                )));
            }
            outgoing[source].push(guarded.len());
            targets.push(target);
            guarded.push(relation.guarded_by(types[source].contains_predicate()));
        }

        Ok(Self {
            types,
            index,
            root,
            children,
            relations: guarded,
            targets,
            outgoing,
        })
    }

    pub fn types(&self) -> &[SemanticType] {
        &self.types
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn root(&self) -> &SemanticType {
        &self.types[self.root]
    }

    pub fn get(&self, name: &str) -> Option<&SemanticType> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    /// The relation from `source` to `target`, if one is registered.
    pub fn relation(&self, source: &str, target: &str) -> Option<&Relation> {
        let source = *self.index.get(source)?;
        let target = *self.index.get(target)?;
        self.outgoing[source]
            .iter()
            .find(|&&r| self.targets[r] == target)
            .map(|&r| &self.relations[r])
    }

    /// Direct refinements of a type, in declaration order.
    pub fn children(&self, name: &str) -> Vec<&SemanticType> {
        self.index
            .get(name)
            .map(|&i| self.children[i].iter().map(|&c| &self.types[c]).collect())
            .unwrap_or_default()
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn type_at(&self, idx: usize) -> &SemanticType {
        &self.types[idx]
    }

    /// Descends the containment tree from the root, taking the first child
    /// that contains the column at each level. Never empty.
    pub(crate) fn detect_path(&self, column: &Column) -> Vec<usize> {
        let mut path = vec![self.root];
        let mut current = self.root;
        while let Some(&next) = self.children[current]
            .iter()
            .find(|&&child| self.types[child].contains(column))
        {
            path.push(next);
            current = next;
        }
        path
    }

    /// Uniform-cost search over applicable relations.
    ///
    /// All seeds start at cost 0 with the original column, in the given order.
    /// States are popped by (cost, discovery order); each type is expanded at
    /// most once. Returns the first popped state that satisfies `goal`.
    pub(crate) fn search<G>(
        &self,
        seeds: &[usize],
        column: &Column,
        goal: G,
        log: &LogConfig,
    ) -> Option<SearchHit>
    where
        G: Fn(&SemanticType, &Column) -> bool,
    {
        let mut states: Vec<Option<SearchState>> = Vec::new();
        let mut frontier = BinaryHeap::new();
        for &seed in seeds {
            frontier.push(Reverse((0u32, states.len())));
            states.push(Some(SearchState {
                type_idx: seed,
                column: column.clone(),
                path: vec![seed],
                cost: 0,
            }));
        }

        let mut visited = vec![false; self.types.len()];
        while let Some(Reverse((_, seq))) = frontier.pop() {
            let Some(state) = states[seq].take() else {
                continue;
            };
            if visited[state.type_idx] {
                continue;
            }
            visited[state.type_idx] = true;

            let ty = &self.types[state.type_idx];
            log_step!(
                log,
                column = column.name(),
                semantic_type = ty.name(),
                cost = state.cost,
                "Visiting type"
            );
            if goal(ty, &state.column) {
                return Some(SearchHit {
                    type_idx: state.type_idx,
                    column: state.column,
                    path: state.path,
                    cost: state.cost,
                });
            }

            for &r in &self.outgoing[state.type_idx] {
                let target = self.targets[r];
                let relation = &self.relations[r];
                if visited[target] || !relation.applies(&state.column) {
                    continue;
                }
                log_coercion!(
                    log,
                    column = column.name(),
                    relation = %relation,
                    "Coercing column"
                );
                let cost = state.cost.saturating_add(relation.cost());
                let mut path = state.path.clone();
                path.push(target);
                frontier.push(Reverse((cost, states.len())));
                states.push(Some(SearchState {
                    type_idx: target,
                    column: relation.transform_unchecked(&state.column),
                    path,
                    cost,
                }));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Value;

    fn is_text(c: &Column) -> bool {
        c.non_missing().all(|v| v.as_str().is_some()) && !c.is_all_missing()
    }

    fn is_number(c: &Column) -> bool {
        c.non_missing().all(|v| v.as_f64().is_some()) && !c.is_all_missing()
    }

    fn to_numbers(c: &Column) -> Column {
        c.map_present(|v| {
            v.as_str()
                .and_then(|s| s.parse::<i64>().ok())
                .map_or(Value::Null, Value::Int)
        })
    }

    fn sample_types() -> Vec<SemanticType> {
        vec![
            SemanticType::catch_all("Any"),
            SemanticType::new("Text", "Any", is_text),
            SemanticType::new("Number", "Any", is_number),
            SemanticType::new("Digits", "Text", |c: &Column| {
                is_text(c)
                    && c.non_missing()
                        .all(|v| v.as_str().is_some_and(|s| s.bytes().all(|b| b.is_ascii_digit())))
            })
            .with_infers(|_: &Column| false),
        ]
    }

    fn sample_graph() -> TypeGraph {
        TypeGraph::new(
            sample_types(),
            vec![Relation::new(
                "Digits",
                "Number",
                |_: &Column| true,
                to_numbers,
            )],
        )
        .unwrap()
    }

    #[test]
    fn test_detect_path_descends_first_match() {
        let graph = sample_graph();
        let path: Vec<&str> = graph
            .detect_path(&Column::new("d", ["1", "22"]))
            .into_iter()
            .map(|i| graph.type_at(i).name())
            .collect();
        assert_eq!(path, vec!["Any", "Text", "Digits"]);

        let path = graph.detect_path(&Column::new("l", [Value::List(vec![])]));
        assert_eq!(path, vec![0]);
    }

    #[test]
    fn test_search_follows_relations() {
        let graph = sample_graph();
        let column = Column::new("d", ["1", "22"]);
        let seeds: Vec<usize> = graph.detect_path(&column).into_iter().rev().collect();

        let hit = graph
            .search(
                &seeds,
                &column,
                |ty, c| !ty.is_catch_all() && ty.name() == "Number" && ty.infers(c),
                &LogConfig::verbose(),
            )
            .unwrap();
        assert_eq!(graph.type_at(hit.type_idx).name(), "Number");
        assert_eq!(hit.cost, 1);
        assert_eq!(hit.path.len(), 2);
        assert_eq!(hit.column.values(), &[Value::Int(1), Value::Int(22)]);
    }

    #[test]
    fn test_search_prefers_zero_cost_seeds() {
        let graph = sample_graph();
        let column = Column::new("d", ["1"]);
        let seeds: Vec<usize> = graph.detect_path(&column).into_iter().rev().collect();
        let hit = graph
            .search(&seeds, &column, |ty, _| ty.name() == "Text", &LogConfig::default())
            .unwrap();
        assert_eq!(hit.cost, 0);
        assert_eq!(hit.column, column);
    }

    #[test]
    fn test_search_without_goal() {
        let graph = sample_graph();
        let column = Column::new("w", ["abc"]);
        let seeds: Vec<usize> = graph.detect_path(&column).into_iter().rev().collect();
        assert!(graph
            .search(&seeds, &column, |ty, _| ty.name() == "Number", &LogConfig::default())
            .is_none());
    }

    #[test]
    fn test_relation_lookup_is_guarded() {
        let graph = sample_graph();
        let relation = graph.relation("Digits", "Number").unwrap();
        assert!(relation.applies(&Column::new("d", ["12"])));
        // the source type does not contain words
        assert!(!relation.applies(&Column::new("w", ["abc"])));
        assert!(graph.relation("Number", "Digits").is_none());
        assert!(graph.relation("Nope", "Digits").is_none());
    }

    #[test]
    fn test_children() {
        let graph = sample_graph();
        let children: Vec<&str> = graph.children("Any").iter().map(|t| t.name()).collect();
        assert_eq!(children, vec!["Text", "Number"]);
        assert!(graph.children("Number").is_empty());
        assert!(graph.children("Nope").is_empty());
        assert_eq!(graph.root().name(), "Any");
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut types = sample_types();
        types.push(SemanticType::new("Text", "Any", is_text));
        let err = TypeGraph::new(types, Vec::new()).unwrap_err();
        assert!(matches!(err, TypesetError::DuplicateType(name) if name == "Text"));
    }

    #[test]
    fn test_root_count_validated() {
        let err = TypeGraph::new(vec![SemanticType::new("Text", "Any", is_text)], Vec::new())
            .unwrap_err();
        assert!(matches!(err, TypesetError::UnknownType(_) | TypesetError::InvalidGraph(_)));

        let mut types = sample_types();
        types.push(SemanticType::catch_all("Other"));
        let err = TypeGraph::new(types, Vec::new()).unwrap_err();
        assert!(matches!(err, TypesetError::InvalidGraph(_)));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut types = sample_types();
        types.push(SemanticType::new("Email", "Strings", is_text));
        let err = TypeGraph::new(types, Vec::new()).unwrap_err();
        assert!(matches!(err, TypesetError::UnknownType(name) if name == "Strings"));
    }

    #[test]
    fn test_parent_cycle_rejected() {
        let mut types = sample_types();
        types.push(SemanticType::new("A", "B", is_text));
        types.push(SemanticType::new("B", "A", is_text));
        let err = TypeGraph::new(types, Vec::new()).unwrap_err();
        assert!(matches!(err, TypesetError::InvalidGraph(_)));
    }

    #[test]
    fn test_bad_relations_rejected() {
        let loop_relation = Relation::new("Text", "Text", |_: &Column| true, Column::clone);
        let err = TypeGraph::new(sample_types(), vec![loop_relation]).unwrap_err();
        assert!(matches!(err, TypesetError::InvalidGraph(_)));

        let dangling = Relation::new("Text", "Date", |_: &Column| true, Column::clone);
        let err = TypeGraph::new(sample_types(), vec![dangling]).unwrap_err();
        assert!(matches!(err, TypesetError::UnknownType(name) if name == "Date"));

        let twice = vec![
            Relation::new("Text", "Number", |_: &Column| true, to_numbers),
            Relation::new("Text", "Number", |_: &Column| false, to_numbers),
        ];
        let err = TypeGraph::new(sample_types(), twice).unwrap_err();
        assert!(matches!(err, TypesetError::InvalidGraph(_)));
    }
}

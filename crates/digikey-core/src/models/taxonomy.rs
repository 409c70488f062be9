use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{conform_branch, null_as_empty};
use crate::key_case;
use crate::schema::{Field, FieldType, Schema};
use crate::CoreError;

static LIMITED_TAXONOMY: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("limited_taxonomy")
        .field(Field::integer("product_count"))
        .field(Field::integer("new_product_count"))
        .field(Field::integer("parameter_id"))
        .field(Field::text("value_id"))
        .field(Field::text("parameter"))
        .field(Field::text("value"))
        .field(Field::list(
            "children",
            FieldType::Nested(limited_taxonomy_schema),
        ))
});

/// Schema of one taxon; `children` refers back to this same schema.
pub fn limited_taxonomy_schema() -> &'static Schema {
    &LIMITED_TAXONOMY
}

/// One taxon of the category tree returned with a keyword search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitedTaxonomy {
    /// Number of products in this taxon.
    pub product_count: Option<i64>,
    pub new_product_count: Option<i64>,
    /// Same for every taxon of a tree.
    pub parameter_id: Option<i64>,
    pub value_id: Option<String>,
    pub parameter: Option<String>,
    /// Name of this taxon.
    pub value: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<LimitedTaxonomy>,
}

impl LimitedTaxonomy {
    /// Builds the tree from the wire-cased `LimitedTaxonomy` branch.
    pub fn from_wire(raw: &Value) -> Result<Self, CoreError> {
        conform_branch(
            limited_taxonomy_schema(),
            "LimitedTaxonomy",
            &key_case::to_snake(raw),
        )
    }

    /// Pre-order traversal yielding `(depth, taxon)`, the root at depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// Number of levels in the tree; a lone root has depth 1.
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(1)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl Display for LimitedTaxonomy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or_default())
    }
}

/// Iterator returned by [`LimitedTaxonomy::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a LimitedTaxonomy)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a LimitedTaxonomy);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::ViolationKind;

    fn taxon(value: &str, children: Value) -> Value {
        json!({
            "ProductCount": 1,
            "NewProductCount": 0,
            "ParameterId": -8,
            "ValueId": value.len().to_string(),
            "Parameter": "Categories",
            "Value": value,
            "Children": children
        })
    }

    #[test]
    fn builds_three_level_tree() {
        let raw = taxon(
            "All Products",
            json!([
                taxon("Capacitors", json!([taxon("Aluminum", json!([]))])),
                taxon("Resistors", json!([taxon("Chip", json!([]))]))
            ]),
        );

        let tree = LimitedTaxonomy::from_wire(&raw).expect("tree must build");
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.to_string(), "All Products");
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[1].children[0].value.as_deref(), Some("Chip"));
        assert_eq!(tree.parameter_id, Some(-8));

        let order = tree
            .walk()
            .map(|(_, node)| node.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            ["All Products", "Capacitors", "Aluminum", "Resistors", "Chip"]
        );
    }

    #[test]
    fn missing_children_become_empty() {
        let tree = LimitedTaxonomy::from_wire(&json!({ "Value": "Leaf", "Children": null }))
            .expect("tree must build");
        assert!(tree.is_leaf());
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.product_count, None);
    }

    #[test]
    fn coerces_numeric_value_ids() {
        let tree = LimitedTaxonomy::from_wire(&json!({ "ValueId": 42, "ProductCount": "7" }))
            .expect("tree must build");
        assert_eq!(tree.value_id.as_deref(), Some("42"));
        assert_eq!(tree.product_count, Some(7));
    }

    #[test]
    fn rejects_malformed_grandchild() {
        let raw = taxon(
            "All",
            json!([taxon("Mid", json!([{ "ProductCount": "lots" }]))]),
        );

        let err = LimitedTaxonomy::from_wire(&raw).expect_err("must fail");
        let report = err.report().expect("carries a report");
        assert!(report.has("children.0.children.0.product_count", ViolationKind::Conversion));
    }

    #[test]
    fn tolerates_deep_trees() {
        let mut raw = json!({ "Value": "leaf" });
        for level in 0..200 {
            raw = json!({ "Value": format!("level {level}"), "Children": [raw] });
        }

        let tree = LimitedTaxonomy::from_wire(&raw).expect("tree must build");
        assert_eq!(tree.depth(), 201);
    }

    #[test]
    fn ignores_unknown_response_keys() {
        let tree = LimitedTaxonomy::from_wire(&json!({ "Value": "x", "TotalCount": 4 }))
            .expect("tree must build");
        assert_eq!(tree.to_string(), "x");
    }
}

use anyhow::{bail, Context, Result};
use url::Url;

use crate::record::Category;

pub const SCHEMA: &str = "https://schema.org/";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const PROV: &str = "http://www.w3.org/ns/prov#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// IRI namespaces for the graph, all rooted at the configured graph base.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespaces {
    pub kb: String,
    pub recipe: String,
    pub category: String,
    pub cuisine: String,
    pub main_ingredient: String,
    pub region: String,
    pub dish_type: String,
    pub cooking_method: String,
    pub ingredient: String,
    pub unit: String,
}

impl Namespaces {
    pub fn new(graph_base: &str) -> Result<Self> {
        let parsed =
            Url::parse(graph_base).with_context(|| format!("Invalid graph base IRI: {}", graph_base))?;
        if parsed.cannot_be_a_base() {
            bail!("Graph base IRI cannot hold paths: {}", graph_base);
        }

        let mut kb = parsed.to_string();
        if !kb.ends_with('/') {
            kb.push('/');
        }
        let category = format!("{}category/", kb);

        Ok(Self {
            recipe: format!("{}recipe/", kb),
            cuisine: format!("{}cuisine/", category),
            main_ingredient: format!("{}ingredient/", category),
            region: format!("{}region/", category),
            dish_type: format!("{}dish-type/", category),
            cooking_method: format!("{}cooking-method/", category),
            ingredient: format!("{}ingredient/", kb),
            unit: format!("{}unit/", kb),
            category,
            kb,
        })
    }

    /// Namespace holding the value nodes of one category type.
    pub fn category_ns(&self, category: Category) -> &str {
        match category {
            Category::Cuisine => &self.cuisine,
            Category::MainIngredient => &self.main_ingredient,
            Category::Region => &self.region,
            Category::DishType => &self.dish_type,
            Category::CookingMethod => &self.cooking_method,
        }
    }

    pub fn kb(&self, local: &str) -> String {
        format!("{}{}", self.kb, local)
    }

    /// Prefix bindings for serialization, in declaration order.
    pub fn prefixes(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("kb", self.kb.as_str()),
            ("kbr", self.recipe.as_str()),
            ("cat", self.category.as_str()),
            ("cuisine", self.cuisine.as_str()),
            ("ing_cat", self.main_ingredient.as_str()),
            ("reg", self.region.as_str()),
            ("dt", self.dish_type.as_str()),
            ("method", self.cooking_method.as_str()),
            ("ing", self.ingredient.as_str()),
            ("unit", self.unit.as_str()),
            ("schema", SCHEMA),
            ("rdf", RDF),
            ("rdfs", RDFS),
            ("skos", SKOS),
            ("xsd", XSD),
            ("prov", PROV),
        ]
    }
}

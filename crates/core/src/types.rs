use crate::schema::{
    json_schema_array, json_schema_enum, json_schema_number, json_schema_object,
    json_schema_string, Schema,
};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;
use std::marker::PhantomData;

/// The kinds of entity held by the backend store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Ingredient,
    Recipe,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Ingredient, EntityKind::Recipe];

    /// Backend collection (and resource path segment) for this kind
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Ingredient => "ingredients",
            Self::Recipe => "recipes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ingredient => "Ingredient",
            Self::Recipe => "Recipe",
        }
    }

    /// Lowercase singular used in tool names (`add-ingredient`)
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Ingredient => "ingredient",
            Self::Recipe => "recipe",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Measurement unit of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "pcs")]
    Piece,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Kilogram,
        Unit::Piece,
        Unit::Gram,
        Unit::Milliliter,
        Unit::Liter,
    ];

    /// Wire spelling of the unit
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Piece => "pcs",
            Self::Gram => "g",
            Self::Milliliter => "ml",
            Self::Liter => "l",
        }
    }

    fn wire_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Unit::as_str).collect()
    }

    fn json_schema() -> Value {
        json_schema_enum(&Self::wire_names(), "Measurement unit")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity stored in one of the backend collections
pub trait Entity: Schema + Serialize + Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Merge-patch view of this entity
    type Patch: EntityPatch;

    fn id(&self) -> &str;

    fn name(&self) -> &str;
}

/// Partial update: an id plus any subset of the mutable fields.
///
/// Serializes to the changed fields only; the id travels in the request path.
pub trait EntityPatch: Schema + Serialize + fmt::Debug + Send + Sync + 'static {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub unit: Unit,
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit: Unit) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit,
        }
    }
}

impl Schema for Ingredient {
    const NAME: &'static str = "Ingredient";

    fn json_schema() -> Value {
        json_schema_object(
            json!({
                "id": json_schema_string("Unique ingredient identifier"),
                "name": json_schema_string("Ingredient name"),
                "unit": Unit::json_schema()
            }),
            vec!["id", "name", "unit"],
        )
    }
}

impl Entity for Ingredient {
    const KIND: EntityKind = EntityKind::Ingredient;
    type Patch = IngredientPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientPatch {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl Schema for IngredientPatch {
    const NAME: &'static str = "IngredientPatch";

    fn json_schema() -> Value {
        json_schema_object(
            json!({
                "id": json_schema_string("Identifier of the ingredient to update"),
                "name": json_schema_string("New ingredient name"),
                "unit": Unit::json_schema()
            }),
            vec!["id"],
        )
    }
}

impl EntityPatch for IngredientPatch {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Reference from a recipe to an ingredient, with an optional amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

impl RecipeIngredient {
    pub fn new(id: impl Into<String>, quantity: Option<f64>) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

impl Schema for RecipeIngredient {
    const NAME: &'static str = "RecipeIngredient";

    fn json_schema() -> Value {
        json_schema_object(
            json!({
                "id": json_schema_string("Ingredient identifier"),
                "quantity": json_schema_number("Amount of the ingredient, in its unit")
            }),
            vec!["id"],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    pub fn contains_ingredient(&self, ingredient_id: &str) -> bool {
        self.ingredients.iter().any(|i| i.id == ingredient_id)
    }
}

impl Schema for Recipe {
    const NAME: &'static str = "Recipe";

    fn json_schema() -> Value {
        json_schema_object(
            json!({
                "id": json_schema_string("Unique recipe identifier"),
                "name": json_schema_string("Recipe name"),
                "ingredients": json_schema_array(
                    RecipeIngredient::json_schema(),
                    "Ingredients of the recipe, in order"
                )
            }),
            vec!["id", "name", "ingredients"],
        )
    }
}

impl Entity for Recipe {
    const KIND: EntityKind = EntityKind::Recipe;
    type Patch = RecipePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePatch {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<RecipeIngredient>>,
}

impl RecipePatch {
    /// Patch replacing the whole ingredient list
    pub fn ingredients(id: impl Into<String>, ingredients: Vec<RecipeIngredient>) -> Self {
        Self {
            id: id.into(),
            name: None,
            ingredients: Some(ingredients),
        }
    }
}

impl Schema for RecipePatch {
    const NAME: &'static str = "RecipePatch";

    fn json_schema() -> Value {
        json_schema_object(
            json!({
                "id": json_schema_string("Identifier of the recipe to update"),
                "name": json_schema_string("New recipe name"),
                "ingredients": json_schema_array(
                    RecipeIngredient::json_schema(),
                    "Replacement ingredient list"
                )
            }),
            vec!["id"],
        )
    }
}

impl EntityPatch for RecipePatch {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Single-key container around a listing: `{ "ingredients": [...] }` / `{ "recipes": [...] }`
#[derive(Debug, Clone, PartialEq)]
pub struct EntityList<E> {
    pub items: Vec<E>,
}

pub type IngredientList = EntityList<Ingredient>;
pub type RecipeList = EntityList<Recipe>;

impl<E> EntityList<E> {
    pub fn new(items: Vec<E>) -> Self {
        Self { items }
    }
}

impl<E: Entity> Serialize for EntityList<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(E::KIND.collection(), &self.items)?;
        map.end()
    }
}

impl<'de, E: Entity> Deserialize<'de> for EntityList<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor<E>(PhantomData<fn() -> E>);

        impl<'de, E: Entity> Visitor<'de> for ListVisitor<E> {
            type Value = EntityList<E>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an object with a `{}` array", E::KIND.collection())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let field = E::KIND.collection();
                let mut items = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key == field {
                        items = Some(map.next_value::<Vec<E>>()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                items
                    .map(EntityList::new)
                    .ok_or_else(|| de::Error::missing_field(field))
            }
        }

        deserializer.deserialize_map(ListVisitor(PhantomData))
    }
}

impl<E: Entity> Schema for EntityList<E> {
    const NAME: &'static str = "EntityList";

    fn json_schema() -> Value {
        let field = E::KIND.collection();
        json_schema_object(
            json!({ field: json_schema_array(E::json_schema(), &format!("All {}", field)) }),
            vec![field],
        )
    }
}

/// `{ "recipe": ... }` container returned by the add-ingredient-to-recipe operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeEnvelope {
    pub recipe: Recipe,
}

impl Schema for RecipeEnvelope {
    const NAME: &'static str = "RecipeEnvelope";

    fn json_schema() -> Value {
        json_schema_object(json!({ "recipe": Recipe::json_schema() }), vec!["recipe"])
    }
}

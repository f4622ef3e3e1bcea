//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate with
//! `diesel print-schema` or update by hand.

diesel::table! {
    /// Registered accounts with hashed credentials.
    users (id) {
        /// Primary key assigned by the store.
        id -> Int4,
        /// Unique login name.
        username -> Varchar,
        /// Unique contact address.
        email -> Varchar,
        /// Argon2id credential hash in PHC string format.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Cached ingredient records keyed by the provider identifier.
    ingredients (id) {
        /// Provider-assigned identifier (not generated locally).
        id -> Int8,
        /// Display name reported by the provider.
        name -> Varchar,
    }
}

diesel::table! {
    /// Cached recipe records keyed by the provider identifier.
    recipes (id) {
        /// Provider-assigned identifier (not generated locally).
        id -> Int8,
        /// Display title reported by the provider.
        title -> Varchar,
        /// Image URL, when supplied.
        image -> Nullable<Varchar>,
        /// Preparation time in minutes.
        ready_in_minutes -> Nullable<Int4>,
        /// Number of servings.
        servings -> Nullable<Int4>,
        /// Attribution name for the original source.
        source_name -> Nullable<Varchar>,
        /// Attribution URL for the original source.
        source_url -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// User↔ingredient favorite associations (a set).
    user_ingredients (user_id, ingredient_id) {
        /// Owning user; cascade-deleted with the account.
        user_id -> Int4,
        /// Saved ingredient.
        ingredient_id -> Int8,
    }
}

diesel::table! {
    /// User↔recipe favorite associations (a set).
    user_recipes (user_id, recipe_id) {
        /// Owning user; cascade-deleted with the account.
        user_id -> Int4,
        /// Saved recipe.
        recipe_id -> Int8,
    }
}

diesel::joinable!(user_ingredients -> users (user_id));
diesel::joinable!(user_ingredients -> ingredients (ingredient_id));
diesel::joinable!(user_recipes -> users (user_id));
diesel::joinable!(user_recipes -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    ingredients,
    recipes,
    user_ingredients,
    user_recipes,
);

//! In-memory adapters backing the end-to-end flows.
//!
//! One store implements both persistence ports so account deletion can drop
//! the user row and its favorite associations under a single lock, matching
//! the relational adapter's cascade semantics.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use backend::domain::ports::{
    CatalogSource, CatalogSourceError, DuplicateField, FavoritesPersistenceError,
    FavoritesRepository, UserPersistenceError, UserRepository,
};
use backend::domain::{
    AccountCandidate, EmailAddress, ExternalId, Ingredient, IngredientSearch,
    IngredientSearchPage, PasswordHash, ProfileUpdate, Recipe, RecipeSearch, RecipeSearchPage,
    User, UserId, Username,
};

#[derive(Clone)]
struct StoredUser {
    id: i32,
    username: String,
    email: String,
    password_hash: String,
}

impl StoredUser {
    fn to_user(&self) -> User {
        User::new(
            UserId::new(self.id),
            Username::new(&self.username).expect("stored username is valid"),
            EmailAddress::new(&self.email).expect("stored email is valid"),
        )
    }
}

#[derive(Default)]
struct StoreState {
    next_user_id: i32,
    users: Vec<StoredUser>,
    ingredients: BTreeMap<i64, Ingredient>,
    recipes: BTreeMap<i64, Recipe>,
    ingredient_favorites: BTreeSet<(i32, i64)>,
    recipe_favorites: BTreeSet<(i32, i64)>,
}

/// In-memory relational store implementing both persistence ports.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn recipe_favorite_count(&self, user: UserId, id: ExternalId) -> usize {
        let state = self.state.lock().expect("state lock");
        usize::from(
            state
                .recipe_favorites
                .contains(&(user.as_i32(), id.as_i64())),
        )
    }

    pub fn association_count_for(&self, user: UserId) -> usize {
        let state = self.state.lock().expect("state lock");
        state
            .ingredient_favorites
            .iter()
            .chain(state.recipe_favorites.iter())
            .filter(|(user_id, _)| *user_id == user.as_i32())
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, candidate: &AccountCandidate) -> Result<User, UserPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state
            .users
            .iter()
            .any(|user| user.username == candidate.username().as_ref())
        {
            return Err(UserPersistenceError::duplicate(DuplicateField::Username));
        }
        if state
            .users
            .iter()
            .any(|user| user.email == candidate.email().as_ref())
        {
            return Err(UserPersistenceError::duplicate(DuplicateField::Email));
        }

        state.next_user_id += 1;
        let stored = StoredUser {
            id: state.next_user_id,
            username: candidate.username().as_ref().to_owned(),
            email: candidate.email().as_ref().to_owned(),
            password_hash: candidate.password_hash().as_str().to_owned(),
        };
        let user = stored.to_user();
        state.users.push(stored);
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .users
            .iter()
            .find(|user| user.username == username.as_ref())
            .map(|user| (user.to_user(), PasswordHash::new(&user.password_hash))))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .users
            .iter()
            .find(|user| user.id == id.as_i32())
            .map(StoredUser::to_user))
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state.users.iter().any(|user| {
            user.id != id.as_i32() && user.username == update.username().as_ref()
        }) {
            return Err(UserPersistenceError::duplicate(DuplicateField::Username));
        }
        if state
            .users
            .iter()
            .any(|user| user.id != id.as_i32() && user.email == update.email().as_ref())
        {
            return Err(UserPersistenceError::duplicate(DuplicateField::Email));
        }

        let Some(user) = state.users.iter_mut().find(|user| user.id == id.as_i32()) else {
            return Err(UserPersistenceError::NotFound);
        };
        user.username = update.username().as_ref().to_owned();
        user.email = update.email().as_ref().to_owned();
        Ok(user.to_user())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        let before = state.users.len();
        state.users.retain(|user| user.id != id.as_i32());
        if state.users.len() == before {
            return Err(UserPersistenceError::NotFound);
        }
        // Cascade: associations go with the account, atomically.
        state
            .ingredient_favorites
            .retain(|(user_id, _)| *user_id != id.as_i32());
        state
            .recipe_favorites
            .retain(|(user_id, _)| *user_id != id.as_i32());
        Ok(())
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryStore {
    async fn find_ingredient(
        &self,
        id: ExternalId,
    ) -> Result<Option<Ingredient>, FavoritesPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.ingredients.get(&id.as_i64()).cloned())
    }

    async fn insert_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state.ingredients.contains_key(&ingredient.id.as_i64()) {
            return Err(FavoritesPersistenceError::duplicate("ingredients pkey"));
        }
        state
            .ingredients
            .insert(ingredient.id.as_i64(), ingredient.clone());
        Ok(())
    }

    async fn find_recipe(
        &self,
        id: ExternalId,
    ) -> Result<Option<Recipe>, FavoritesPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.recipes.get(&id.as_i64()).cloned())
    }

    async fn insert_recipe(&self, recipe: &Recipe) -> Result<(), FavoritesPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state.recipes.contains_key(&recipe.id.as_i64()) {
            return Err(FavoritesPersistenceError::duplicate("recipes pkey"));
        }
        state.recipes.insert(recipe.id.as_i64(), recipe.clone());
        Ok(())
    }

    async fn add_ingredient_favorite(
        &self,
        user: UserId,
        ingredient: ExternalId,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        state
            .ingredient_favorites
            .insert((user.as_i32(), ingredient.as_i64()));
        Ok(())
    }

    async fn add_recipe_favorite(
        &self,
        user: UserId,
        recipe: ExternalId,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        state
            .recipe_favorites
            .insert((user.as_i32(), recipe.as_i64()));
        Ok(())
    }

    async fn remove_ingredient_favorite(
        &self,
        user: UserId,
        ingredient: ExternalId,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        state
            .ingredient_favorites
            .remove(&(user.as_i32(), ingredient.as_i64()));
        Ok(())
    }

    async fn remove_recipe_favorite(
        &self,
        user: UserId,
        recipe: ExternalId,
    ) -> Result<(), FavoritesPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        state
            .recipe_favorites
            .remove(&(user.as_i32(), recipe.as_i64()));
        Ok(())
    }

    async fn list_ingredient_favorites(
        &self,
        user: UserId,
    ) -> Result<Vec<Ingredient>, FavoritesPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .ingredient_favorites
            .iter()
            .filter(|(user_id, _)| *user_id == user.as_i32())
            .filter_map(|(_, id)| state.ingredients.get(id).cloned())
            .collect())
    }

    async fn list_recipe_favorites(
        &self,
        user: UserId,
    ) -> Result<Vec<Recipe>, FavoritesPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .recipe_favorites
            .iter()
            .filter(|(user_id, _)| *user_id == user.as_i32())
            .filter_map(|(_, id)| state.recipes.get(id).cloned())
            .collect())
    }
}

/// Provider stub with a fixed record set and fetch counters.
pub struct StubCatalogSource {
    recipes: BTreeMap<i64, Recipe>,
    ingredients: BTreeMap<i64, Ingredient>,
    pub recipe_fetches: AtomicUsize,
    pub ingredient_fetches: AtomicUsize,
}

impl StubCatalogSource {
    pub fn new() -> Self {
        let mut recipes = BTreeMap::new();
        recipes.insert(
            42,
            Recipe {
                id: ExternalId::new(42),
                title: "Soup".to_owned(),
                image: None,
                ready_in_minutes: Some(25),
                servings: Some(4),
                source_name: None,
                source_url: None,
            },
        );
        let mut ingredients = BTreeMap::new();
        ingredients.insert(
            9266,
            Ingredient {
                id: ExternalId::new(9266),
                name: "banana".to_owned(),
            },
        );
        Self {
            recipes,
            ingredients,
            recipe_fetches: AtomicUsize::new(0),
            ingredient_fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CatalogSource for StubCatalogSource {
    async fn fetch_ingredient(&self, id: ExternalId) -> Result<Ingredient, CatalogSourceError> {
        self.ingredient_fetches.fetch_add(1, Ordering::Relaxed);
        self.ingredients
            .get(&id.as_i64())
            .cloned()
            .ok_or_else(|| CatalogSourceError::not_found(format!("no ingredient {id}")))
    }

    async fn fetch_recipe(&self, id: ExternalId) -> Result<Recipe, CatalogSourceError> {
        self.recipe_fetches.fetch_add(1, Ordering::Relaxed);
        self.recipes
            .get(&id.as_i64())
            .cloned()
            .ok_or_else(|| CatalogSourceError::not_found(format!("no recipe {id}")))
    }

    async fn search_ingredients(
        &self,
        search: &IngredientSearch,
    ) -> Result<IngredientSearchPage, CatalogSourceError> {
        let results = self
            .ingredients
            .values()
            .filter(|ingredient| ingredient.name.contains(search.query()))
            .map(|ingredient| backend::domain::IngredientHit {
                id: ingredient.id,
                name: ingredient.name.clone(),
                image: None,
            })
            .collect::<Vec<_>>();
        Ok(IngredientSearchPage {
            offset: search.offset(),
            total_results: results.len() as u32,
            results,
        })
    }

    async fn search_recipes(
        &self,
        search: &RecipeSearch,
    ) -> Result<RecipeSearchPage, CatalogSourceError> {
        let results = self
            .recipes
            .values()
            .filter(|recipe| recipe.title.to_lowercase().contains(search.query()))
            .map(|recipe| backend::domain::RecipeHit {
                id: recipe.id,
                title: recipe.title.clone(),
                image: recipe.image.clone(),
            })
            .collect::<Vec<_>>();
        Ok(RecipeSearchPage {
            offset: search.offset(),
            total_results: results.len() as u32,
            results,
        })
    }
}

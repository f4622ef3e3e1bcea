//! DTOs for decoding provider JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records in one pass. Only the identifier is required; every other
//! field decodes as unset when the provider omits it.

use serde::Deserialize;

use crate::domain::{
    ExternalId, Ingredient, IngredientHit, IngredientSearchPage, Recipe, RecipeHit,
    RecipeSearchPage,
};

#[derive(Debug, Deserialize)]
pub(super) struct IngredientInformationDto {
    pub(super) id: i64,
    #[serde(default)]
    pub(super) name: String,
}

impl From<IngredientInformationDto> for Ingredient {
    fn from(dto: IngredientInformationDto) -> Self {
        Self {
            id: ExternalId::new(dto.id),
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RecipeInformationDto {
    pub(super) id: i64,
    #[serde(default)]
    pub(super) title: String,
    pub(super) image: Option<String>,
    pub(super) ready_in_minutes: Option<i32>,
    pub(super) servings: Option<i32>,
    pub(super) source_name: Option<String>,
    pub(super) source_url: Option<String>,
}

impl From<RecipeInformationDto> for Recipe {
    fn from(dto: RecipeInformationDto) -> Self {
        Self {
            id: ExternalId::new(dto.id),
            title: dto.title,
            image: dto.image,
            ready_in_minutes: dto.ready_in_minutes,
            servings: dto.servings,
            source_name: dto.source_name,
            source_url: dto.source_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct IngredientHitDto {
    pub(super) id: i64,
    #[serde(default)]
    pub(super) name: String,
    pub(super) image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct IngredientSearchResponseDto {
    #[serde(default)]
    pub(super) results: Vec<IngredientHitDto>,
    #[serde(default)]
    pub(super) offset: u32,
    #[serde(default)]
    pub(super) total_results: u32,
}

impl From<IngredientSearchResponseDto> for IngredientSearchPage {
    fn from(dto: IngredientSearchResponseDto) -> Self {
        Self {
            results: dto
                .results
                .into_iter()
                .map(|hit| IngredientHit {
                    id: ExternalId::new(hit.id),
                    name: hit.name,
                    image: hit.image,
                })
                .collect(),
            offset: dto.offset,
            total_results: dto.total_results,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RecipeHitDto {
    pub(super) id: i64,
    #[serde(default)]
    pub(super) title: String,
    pub(super) image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RecipeSearchResponseDto {
    #[serde(default)]
    pub(super) results: Vec<RecipeHitDto>,
    #[serde(default)]
    pub(super) offset: u32,
    #[serde(default)]
    pub(super) total_results: u32,
}

impl From<RecipeSearchResponseDto> for RecipeSearchPage {
    fn from(dto: RecipeSearchResponseDto) -> Self {
        Self {
            results: dto
                .results
                .into_iter()
                .map(|hit| RecipeHit {
                    id: ExternalId::new(hit.id),
                    title: hit.title,
                    image: hit.image,
                })
                .collect(),
            offset: dto.offset,
            total_results: dto.total_results,
        }
    }
}

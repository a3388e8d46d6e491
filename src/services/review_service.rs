use mongodb::bson::{doc, Document};

use crate::{
    database::{DocumentStore, InsertOutcome, REVIEWS},
    utils::AppResult,
};

pub async fn list_reviews(store: &dyn DocumentStore) -> AppResult<Vec<Document>> {
    Ok(store.find(REVIEWS, doc! {}).await?)
}

pub async fn add_review(store: &dyn DocumentStore, mut review: Document) -> AppResult<InsertOutcome> {
    review.remove("_id");
    let outcome = store.insert_one(REVIEWS, review).await?;
    log::info!("⭐ Review {} added", outcome.inserted_id);
    Ok(outcome)
}

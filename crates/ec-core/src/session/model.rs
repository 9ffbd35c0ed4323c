use chrono::NaiveDate;
use serde::Serialize;

use crate::ids::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Seller,
}

/// Marketplace listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub seller_name: String,
    pub rank: Option<String>,
    pub video_url: Option<String>,
}

/// Seller form input; id and seller name are assigned on listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBadge {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedProject {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub date: NaiveDate,
}

pub(crate) fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::from("p1"),
            name: "Bottle Lampshade".into(),
            description: "A beautiful handcrafted lampshade made from recycled PET bottles.".into(),
            price: 25.0,
            image_url: "https://picsum.photos/seed/lamp/400/300".into(),
            seller_name: "CreativeCathy".into(),
            rank: None,
            video_url: None,
        },
        Product {
            id: ProductId::from("p2"),
            name: "Upcycled Planter Set".into(),
            description: "Colorful planters perfect for indoor succulents.".into(),
            price: 15.0,
            image_url: "https://picsum.photos/seed/planter/400/300".into(),
            seller_name: "GreenThumbs".into(),
            rank: None,
            video_url: None,
        },
    ]
}

pub(crate) fn seed_badges() -> Vec<UserBadge> {
    [
        ("1", "Eco Starter", "🌱", "bg-green-100"),
        ("2", "Master Upcycler", "🎨", "bg-purple-100"),
        ("3", "Waste Warrior", "⚔️", "bg-blue-100"),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| UserBadge {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        color: color.into(),
    })
    .collect()
}

pub(crate) fn seed_projects() -> Vec<CompletedProject> {
    NaiveDate::from_ymd_opt(2024, 5, 10)
        .map(|date| CompletedProject {
            id: "up1".into(),
            name: "Eco Bottle Vase".into(),
            image_url: "https://picsum.photos/seed/vase/200/200".into(),
            date,
        })
        .into_iter()
        .collect()
}

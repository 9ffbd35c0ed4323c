//! Application session.
//!
//! Explicit replacement for app-root shared state. Holds the selected role,
//! login flag, active language and the in-memory catalogue. Nothing here is
//! persisted.

mod model;

use chrono::NaiveDate;
use thiserror::Error;

use crate::ids::ProductId;
use crate::language::Language;

pub use model::{CompletedProject, Product, ProductDraft, Role, UserBadge};

/// Seller name stamped on listings created in this session.
pub const SESSION_SELLER_NAME: &str = "Creative Creator";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("select a role before logging in")]
    NoRoleSelected,
    #[error("not logged in")]
    NotLoggedIn,
    #[error("only sellers can list products")]
    NotSeller,
}

#[derive(Debug, Clone)]
pub struct AppSession {
    role: Option<Role>,
    logged_in: bool,
    language: Language,
    products: Vec<Product>,
    badges: Vec<UserBadge>,
    completed_projects: Vec<CompletedProject>,
}

impl AppSession {
    /// New logged-out session seeded with the demo catalogue.
    pub fn new(language: Language) -> Self {
        Self {
            role: None,
            logged_in: false,
            language,
            products: model::seed_products(),
            badges: model::seed_badges(),
            completed_projects: model::seed_projects(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn badges(&self) -> &[UserBadge] {
        &self.badges
    }

    pub fn completed_projects(&self) -> &[CompletedProject] {
        &self.completed_projects
    }

    /// Picks (or clears) the role on the landing screen.
    pub fn select_role(&mut self, role: Option<Role>) {
        self.role = role;
    }

    pub fn login(&mut self) -> Result<Role, SessionError> {
        let role = self.role.ok_or(SessionError::NoRoleSelected)?;
        self.logged_in = true;
        Ok(role)
    }

    /// Clears login and role; catalogue and language survive.
    pub fn logout(&mut self) {
        self.logged_in = false;
        self.role = None;
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Lists a product at the front of the catalogue.
    pub fn add_product(&mut self, draft: ProductDraft) -> Result<&Product, SessionError> {
        if !self.logged_in {
            return Err(SessionError::NotLoggedIn);
        }
        if self.role != Some(Role::Seller) {
            return Err(SessionError::NotSeller);
        }
        let product = Product {
            id: ProductId::new(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
            seller_name: SESSION_SELLER_NAME.to_string(),
            rank: None,
            video_url: draft.video_url.filter(|url| !url.is_empty()),
        };
        self.products.insert(0, product);
        Ok(&self.products[0])
    }

    /// Records a finished reuse project, newest first.
    pub fn record_completed_project(
        &mut self,
        name: impl Into<String>,
        image_url: impl Into<String>,
        date: NaiveDate,
    ) -> &CompletedProject {
        let project = CompletedProject {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            image_url: image_url.into(),
            date,
        };
        self.completed_projects.insert(0, project);
        &self.completed_projects[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            description: "d".into(),
            price: 9.5,
            image_url: "https://example.com/p.png".into(),
            video_url: Some(String::new()),
        }
    }

    #[test]
    fn new_session_is_seeded() {
        let session = AppSession::new(Language::En);
        assert!(!session.is_logged_in());
        assert_eq!(session.products().len(), 2);
        assert_eq!(session.products()[0].name, "Bottle Lampshade");
        assert_eq!(session.badges().len(), 3);
        assert_eq!(session.badges()[2].name, "Waste Warrior");
        assert_eq!(session.completed_projects()[0].name, "Eco Bottle Vase");
    }

    #[test]
    fn login_requires_a_role() {
        let mut session = AppSession::new(Language::En);
        assert_eq!(session.login(), Err(SessionError::NoRoleSelected));
        session.select_role(Some(Role::User));
        assert_eq!(session.login(), Ok(Role::User));
        assert!(session.is_logged_in());
    }

    #[test]
    fn logout_clears_role_but_keeps_language() {
        let mut session = AppSession::new(Language::En);
        session.select_role(Some(Role::Seller));
        session.login().unwrap();
        session.toggle_language();
        session.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.role(), None);
        assert_eq!(session.language(), Language::Ta);
    }

    #[test]
    fn add_product_prepends_for_sellers_only() {
        let mut session = AppSession::new(Language::En);
        session.select_role(Some(Role::User));
        session.login().unwrap();
        assert_eq!(session.add_product(draft("Jar Lamp")).unwrap_err(), SessionError::NotSeller);

        session.logout();
        session.select_role(Some(Role::Seller));
        session.login().unwrap();
        let listed = session.add_product(draft("Jar Lamp")).unwrap().clone();
        assert_eq!(listed.seller_name, SESSION_SELLER_NAME);
        assert_eq!(listed.video_url, None);
        assert_eq!(session.products()[0].id, listed.id);
        assert_eq!(session.products().len(), 3);
    }

    #[test]
    fn completed_projects_are_newest_first() {
        let mut session = AppSession::new(Language::En);
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        session.record_completed_project("Bottle Planter", "https://picsum.photos/seed/9/600/400", date);
        assert_eq!(session.completed_projects().len(), 2);
        assert_eq!(session.completed_projects()[0].name, "Bottle Planter");
        assert_eq!(session.completed_projects()[0].date, date);
    }
}

//! Frontend Models
//!
//! Data structures matching the REST API payloads.

use lazy_forest::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Uz,
    Ru,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Uz => "uz",
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }
}

/// User account (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub phone_number: String,
    pub username: Option<String>,
    pub telegram_id: Option<String>,
    pub full_name: Option<String>,
    pub role: Role,
    pub current_lang: Lang,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login: Option<String>,
}

impl User {
    /// Name shown in headers: full name, then username
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn initial(&self) -> char {
        self.full_name
            .as_deref()
            .and_then(|n| n.chars().next())
            .or_else(|| self.username.as_deref().and_then(|n| n.chars().next()))
            .unwrap_or('?')
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Restaurant organization synced from iiko
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub iiko_id: String,
    pub name: String,
    pub country: Option<String>,
    pub restaurant_address: Option<String>,
    pub timezone: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Catalog group (category tree node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub iiko_id: String,
    pub name_uz: String,
    pub name_ru: String,
    pub name_en: String,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    pub description_en: Option<String>,
    pub parent_group_id: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub is_included_in_menu: bool,
    pub is_active: bool,
    #[serde(default)]
    pub active_products_count: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for Group {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub iiko_id: String,
    pub name_uz: String,
    pub name_ru: String,
    pub name_en: String,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    pub description_en: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    pub group_id: Option<String>,
    #[serde(default)]
    pub organization_id: String,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    SentToIiko,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    Failed,
    Declined,
}

impl OrderStatus {
    /// Statuses an admin may set by hand
    pub const EDITABLE: [OrderStatus; 3] = [OrderStatus::Pending, OrderStatus::Confirmed, OrderStatus::Declined];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::SentToIiko => "sent_to_iiko",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Failed => "failed",
            OrderStatus::Declined => "declined",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [
            OrderStatus::Pending,
            OrderStatus::SentToIiko,
            OrderStatus::Confirmed,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
            OrderStatus::Failed,
            OrderStatus::Declined,
        ]
        .into_iter()
        .find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: u64,
    pub iiko_id: Option<String>,
    pub organization_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub telegram_message_id: Option<i64>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: String,
    pub updated_at: String,
}

/// Paginated collection envelope
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paginated<T> {
    pub total: u64,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub url: String,
}

// ========================
// Update Payloads
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductUpdate {
    pub name_ru: String,
    pub name_uz: String,
    pub name_en: String,
    pub description_ru: String,
    pub description_uz: String,
    pub description_en: String,
    pub price: f64,
    pub is_active: bool,
    pub images: Vec<String>,
    pub group_id: Option<String>,
}

impl ProductUpdate {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name_ru: product.name_ru.clone(),
            name_uz: product.name_uz.clone(),
            name_en: product.name_en.clone(),
            description_ru: product.description_ru.clone().unwrap_or_default(),
            description_uz: product.description_uz.clone().unwrap_or_default(),
            description_en: product.description_en.clone().unwrap_or_default(),
            price: product.price,
            is_active: product.is_active,
            images: product.images.clone(),
            group_id: product.group_id.clone(),
        }
    }

    /// Reject payloads the backend would store in a broken state
    pub fn validate(&self) -> Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Price must be a non-negative number".to_string());
        }
        for (label, name) in [("RU", &self.name_ru), ("UZ", &self.name_uz), ("EN", &self.name_en)] {
            if name.trim().is_empty() {
                return Err(format!("Name ({}) is required", label));
            }
        }
        Ok(())
    }
}

/// Partial user update; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn activation(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationUpdate {
    pub name: String,
    pub country: String,
    pub restaurant_address: String,
    pub timezone: String,
    pub is_active: bool,
}

impl OrganizationUpdate {
    pub fn from_organization(org: &Organization) -> Self {
        Self {
            name: org.name.clone(),
            country: org.country.clone().unwrap_or_default(),
            restaurant_address: org.restaurant_address.clone().unwrap_or_default(),
            timezone: org.timezone.clone().unwrap_or_default(),
            is_active: org.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderUpdate {
    pub status: OrderStatus,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_update() -> ProductUpdate {
        ProductUpdate {
            name_ru: "Кола".to_string(),
            name_uz: "Kola".to_string(),
            name_en: "Cola".to_string(),
            description_ru: String::new(),
            description_uz: String::new(),
            description_en: String::new(),
            price: 12.5,
            is_active: true,
            images: vec![],
            group_id: Some("g2".to_string()),
        }
    }

    #[test]
    fn test_product_update_validation() {
        assert!(product_update().validate().is_ok());

        let mut negative = product_update();
        negative.price = -1.0;
        assert!(negative.validate().is_err());

        let mut nan = product_update();
        nan.price = f64::NAN;
        assert!(nan.validate().is_err());

        let mut unnamed = product_update();
        unnamed.name_uz = "   ".to_string();
        assert_eq!(unnamed.validate().unwrap_err(), "Name (UZ) is required");
    }

    #[test]
    fn test_activation_update_sends_only_flag() {
        let json = serde_json::to_value(UserUpdate::activation(false)).unwrap();
        assert_eq!(json, serde_json::json!({ "is_active": false }));
    }

    #[test]
    fn test_order_status_wire_names() {
        let order: OrderStatus = serde_json::from_str("\"sent_to_iiko\"").unwrap();
        assert_eq!(order, OrderStatus::SentToIiko);
        assert_eq!(OrderStatus::parse("declined"), Some(OrderStatus::Declined));
        assert_eq!(OrderStatus::parse("lost"), None);
    }

    #[test]
    fn test_group_tolerates_missing_counters() {
        let json = r#"{
            "id": "g1", "name_uz": "Ichimliklar", "name_ru": "Напитки", "name_en": "Drinks",
            "description_uz": null, "description_ru": null, "description_en": null,
            "parent_group_id": null, "is_active": true
        }"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.active_products_count, 0);
        assert_eq!(group.id(), "g1");
    }

    #[test]
    fn test_user_display_name_fallbacks() {
        let mut user: User = serde_json::from_value(serde_json::json!({
            "id": "u1", "phone_number": "+998901234567", "username": "aziz",
            "telegram_id": null, "full_name": null, "role": "admin", "current_lang": "ru",
            "is_active": true, "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00",
            "last_login": null
        }))
        .unwrap();
        assert_eq!(user.display_name(), "aziz");
        assert_eq!(user.initial(), 'a');

        user.full_name = Some("Aziz Karimov".to_string());
        assert_eq!(user.display_name(), "Aziz Karimov");
    }

    #[test]
    fn test_login_response_ignores_token_type() {
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "access_token": "jwt-token", "token_type": "bearer",
            "user": {
                "id": "u1", "phone_number": "+998901234567", "username": "admin",
                "telegram_id": null, "full_name": null, "role": "admin", "current_lang": "en",
                "is_active": true, "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00",
                "last_login": null
            }
        }))
        .unwrap();
        assert_eq!(response.access_token, "jwt-token");
        assert_eq!(response.user.role, Role::Admin);
    }
}

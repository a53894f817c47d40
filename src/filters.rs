//! List Filters
//!
//! Client-side search over already fetched lists.

use crate::models::{Group, Order, User};

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Root group filter over the Russian and English names
pub fn group_matches(group: &Group, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || contains_ci(&group.name_ru, &query) || contains_ci(&group.name_en, &query)
}

/// Username, full name, phone or telegram id
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|user| {
            [
                user.username.as_deref(),
                user.full_name.as_deref(),
                Some(user.phone_number.as_str()),
                user.telegram_id.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| contains_ci(field, &query))
        })
        .cloned()
        .collect()
}

/// Order number (a `#` in the query is ignored), customer name or phone
pub fn filter_orders(orders: &[Order], query: &str) -> Vec<Order> {
    let query = query.trim().to_lowercase().replacen('#', "", 1);
    if query.is_empty() {
        return orders.to_vec();
    }
    orders
        .iter()
        .filter(|order| {
            order.order_number.to_string().contains(&query)
                || contains_ci(&order.customer_name, &query)
                || order.customer_phone.contains(&query)
        })
        .cloned()
        .collect()
}

use sqlx::FromRow;
use std::fmt;

/// Seller integration credentials for the marketplace partner API.
#[derive(Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub partner_id: i64,
    pub shop_id: i64,
    pub partner_key: String,
    pub access_token: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("partner_id", &self.partner_id)
            .field("shop_id", &self.shop_id)
            .field("partner_key", &"<redacted>")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

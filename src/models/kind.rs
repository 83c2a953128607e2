use serde::{Deserialize, Serialize};

/// A table column: header text plus the display key read from each entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub key: &'static str,
    pub searchable: bool,
}

impl Column {
    const fn search(header: &'static str, key: &'static str) -> Self {
        Self { header, key, searchable: true }
    }

    const fn show(header: &'static str, key: &'static str) -> Self {
        Self { header, key, searchable: false }
    }
}

/// Backend record kinds the admin client manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Tenant,
    Landlord,
    Property,
    Admin,
    MaintenanceRequest,
    Ticket,
    Wallet,
    ServiceProvider,
    PropertyCheckup,
}

const USER_COLUMNS: &[Column] = &[
    Column::search("Name", "name"),
    Column::search("Email", "email"),
    Column::search("Number", "number"),
    Column::show("Status", "status"),
];

const LANDLORD_COLUMNS: &[Column] = &[
    Column::search("Name", "name"),
    Column::search("Email", "email"),
    Column::search("Number", "number"),
    Column::show("Status", "status"),
    Column::show("Listing Count", "listings_count"),
];

const PROPERTY_COLUMNS: &[Column] = &[
    Column::search("Title", "title"),
    Column::search("Name", "landlord.name"),
    Column::search("BHK", "bhk"),
    Column::search("Rent", "rent"),
    Column::search("Status", "status"),
];

const ADMIN_COLUMNS: &[Column] = &[
    Column::search("Name", "name"),
    Column::search("Email", "email"),
    Column::show("Created", "createdAt"),
];

const MAINTENANCE_COLUMNS: &[Column] = &[
    Column::search("ID", "id"),
    Column::search("Tenant", "tenant.name"),
    Column::search("Property", "property.title"),
    Column::search("Summary", "description"),
    Column::search("Urgency", "urgency"),
    Column::search("Status", "status"),
    Column::search("Response", "landlord.name"),
];

const TICKET_COLUMNS: &[Column] = &[
    Column::search("ID", "id"),
    Column::search("Subject", "subject"),
    Column::search("User", "user.name"),
    Column::search("Status", "status"),
];

const WALLET_COLUMNS: &[Column] = &[
    Column::search("User", "user.name"),
    Column::search("Email", "user.email"),
    Column::show("Balance", "balance"),
];

const PROVIDER_COLUMNS: &[Column] = &[
    Column::search("Name", "name"),
    Column::search("Email", "email"),
    Column::search("Service", "service_type"),
    Column::search("Status", "status"),
];

const CHECKUP_COLUMNS: &[Column] = &[
    Column::search("ID", "id"),
    Column::search("Property", "property.title"),
    Column::search("Status", "status"),
    Column::show("Due", "due_date"),
];

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Tenant,
        EntityKind::Landlord,
        EntityKind::Property,
        EntityKind::Admin,
        EntityKind::MaintenanceRequest,
        EntityKind::Ticket,
        EntityKind::Wallet,
        EntityKind::ServiceProvider,
        EntityKind::PropertyCheckup,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Tenant => "Tenant",
            EntityKind::Landlord => "Landlord",
            EntityKind::Property => "Property",
            EntityKind::Admin => "Admin",
            EntityKind::MaintenanceRequest => "Maintenance Request",
            EntityKind::Ticket => "Support Ticket",
            EntityKind::Wallet => "Wallet",
            EntityKind::ServiceProvider => "Service Provider",
            EntityKind::PropertyCheckup => "Property Checkup",
        }
    }

    /// Key of the entity array in a list response
    pub fn list_key(&self) -> &'static str {
        match self {
            EntityKind::Tenant | EntityKind::Landlord => "users",
            EntityKind::Property => "properties",
            EntityKind::Admin => "admins",
            EntityKind::MaintenanceRequest => "requests",
            EntityKind::Ticket => "tickets",
            EntityKind::Wallet => "wallets",
            EntityKind::ServiceProvider => "providers",
            EntityKind::PropertyCheckup => "checkups",
        }
    }

    /// Account type segment for `/admin/getUsers/{kind}`
    pub fn account_type(&self) -> Option<&'static str> {
        match self {
            EntityKind::Tenant => Some("Tenant"),
            EntityKind::Landlord => Some("Landlord"),
            _ => None,
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            EntityKind::Tenant => USER_COLUMNS,
            EntityKind::Landlord => LANDLORD_COLUMNS,
            EntityKind::Property => PROPERTY_COLUMNS,
            EntityKind::Admin => ADMIN_COLUMNS,
            EntityKind::MaintenanceRequest => MAINTENANCE_COLUMNS,
            EntityKind::Ticket => TICKET_COLUMNS,
            EntityKind::Wallet => WALLET_COLUMNS,
            EntityKind::ServiceProvider => PROVIDER_COLUMNS,
            EntityKind::PropertyCheckup => CHECKUP_COLUMNS,
        }
    }

    pub fn search_keys(&self) -> impl Iterator<Item = &'static str> {
        self.columns().iter().filter(|c| c.searchable).map(|c| c.key)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

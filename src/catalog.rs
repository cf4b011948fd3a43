// Fixed vocabularies the synthetic fleet is drawn from.

use fleetreport_entity::prelude::ProductType;

/// Firmware a product type should be running, plus older releases still seen in the field.
pub struct FirmwareVersions {
    pub current: &'static str,
    pub legacy: &'static [&'static str],
}

static WIRELESS_FIRMWARE: FirmwareVersions = FirmwareVersions {
    current: "wireless-28-7",
    legacy: &[
        "wireless-27-6",
        "wireless-26-8",
        "wireless-28-5",
        "wireless-27-7",
    ],
};

static SWITCH_FIRMWARE: FirmwareVersions = FirmwareVersions {
    current: "switch-14-33",
    legacy: &["switch-14-32", "switch-14-31", "switch-13-24", "switch-14-30"],
};

static APPLIANCE_FIRMWARE: FirmwareVersions = FirmwareVersions {
    current: "appliance-18-107",
    legacy: &[
        "appliance-18-106",
        "appliance-17-10",
        "appliance-18-105",
        "appliance-17-9",
    ],
};

pub fn firmware(product_type: ProductType) -> &'static FirmwareVersions {
    match product_type {
        ProductType::Wireless => &WIRELESS_FIRMWARE,
        ProductType::Switch => &SWITCH_FIRMWARE,
        ProductType::Appliance => &APPLIANCE_FIRMWARE,
    }
}

pub fn models(product_type: ProductType) -> &'static [&'static str] {
    match product_type {
        ProductType::Wireless => &[
            "MR36", "MR46", "MR56", "MR33", "MR42", "MR44", "MR53", "MR20", "MR30H",
        ],
        ProductType::Switch => &[
            "MS220-8P",
            "MS225-48FP",
            "MS250-48FP",
            "MS350-24X",
            "MS120-8FP",
            "MS210-48FP",
            "MS410-32",
        ],
        ProductType::Appliance => &[
            "MX64", "MX67", "MX68", "MX75", "MX84", "MX95", "MX100", "MX250", "Z3",
        ],
    }
}

/// Sample customers, in the order they are seeded.
pub const CUSTOMERS: [&str; 10] = [
    "Acme Corporation",
    "TechStart Industries",
    "Global Retail Co",
    "Healthcare Solutions LLC",
    "Metro School District",
    "Downtown Hotel Group",
    "Riverside Manufacturing",
    "Pacific Financial Services",
    "Mountain View Logistics",
    "Summit Consulting Partners",
];

pub(crate) const BUILDINGS: [&str; 7] = [
    "HQ",
    "Building-A",
    "Building-B",
    "Warehouse",
    "Office",
    "Store",
    "Campus",
];
pub(crate) const FLOORS: [&str; 6] = ["1", "2", "3", "4", "5", "G"];
pub(crate) const LOCATIONS: [&str; 7] = [
    "Reception",
    "Lobby",
    "Conference",
    "IT-Room",
    "Storage",
    "Workshop",
    "Cafeteria",
];

pub const TAGS: [&str; 6] = [
    "production",
    "office",
    "warehouse",
    "guest",
    "iot",
    "security",
];

// Serial alphabet: no I, O, 0 or 1.
pub(crate) const SERIAL_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ234567";

pub(crate) const STREET_NAMES: [&str; 12] = [
    "Main",
    "Oak",
    "Maple",
    "Cedar",
    "Pine",
    "Elm",
    "Washington",
    "Lake",
    "Hill",
    "Park",
    "River",
    "Sunset",
];
pub(crate) const STREET_SUFFIXES: [&str; 6] = ["St", "Ave", "Blvd", "Rd", "Ln", "Dr"];
pub(crate) const CITIES: [(&str, &str); 12] = [
    ("Austin", "TX"),
    ("Denver", "CO"),
    ("Portland", "OR"),
    ("Seattle", "WA"),
    ("Phoenix", "AZ"),
    ("Columbus", "OH"),
    ("Nashville", "TN"),
    ("Raleigh", "NC"),
    ("Sacramento", "CA"),
    ("Madison", "WI"),
    ("Boise", "ID"),
    ("Richmond", "VA"),
];

pub(crate) const NOTE_WORDS: [&str; 24] = [
    "replaced",
    "uplink",
    "cable",
    "closet",
    "ceiling",
    "mounted",
    "rack",
    "near",
    "the",
    "main",
    "entrance",
    "check",
    "power",
    "supply",
    "after",
    "outage",
    "pending",
    "upgrade",
    "contact",
    "facilities",
    "before",
    "moving",
    "spare",
    "unit",
];

pub(crate) fn device_url(serial: &str) -> String {
    format!("https://n149.meraki.com/o/-/manage/nodes/new_wired_status/{serial}")
}

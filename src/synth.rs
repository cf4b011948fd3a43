// Synthesize individually plausible device attributes.
//
// Every function is total and free of side effects; the caller owns the
// random stream, so tests can pass a seeded generator.

use chrono::{Duration, Local};
use fleetreport_entity::device;
use fleetreport_entity::prelude::ProductType;
use rand::seq::SliceRandom;
use rand::Rng;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::catalog;

/// A device as generated, before storage assigns it an id.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceRecord {
    pub customer: String,
    pub address: Option<String>,
    pub config_updated: String,
    pub details: Option<String>,
    pub firmware: String,
    pub lan_ip: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub mac: String,
    pub model: String,
    pub name: String,
    pub network_id: String,
    pub notes: Option<String>,
    pub product_type: ProductType,
    pub serial: String,
    pub tags: Option<String>,
    pub url: String,
}

impl From<DeviceRecord> for device::ActiveModel {
    fn from(record: DeviceRecord) -> Self {
        device::ActiveModel {
            id: NotSet,
            customer: Set(record.customer),
            address: Set(record.address),
            config_updated: Set(record.config_updated),
            details: Set(record.details),
            firmware: Set(record.firmware),
            lan_ip: Set(record.lan_ip),
            latitude: Set(record.latitude),
            longitude: Set(record.longitude),
            mac: Set(record.mac),
            model: Set(record.model),
            name: Set(record.name),
            network_id: Set(record.network_id),
            notes: Set(record.notes),
            product_type: Set(record.product_type),
            serial: Set(record.serial),
            tags: Set(record.tags),
            url: Set(record.url),
        }
    }
}

// Uniform choice from a catalog vocabulary; none of them are empty.
fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

pub fn synthesize_name<R: Rng + ?Sized>(rng: &mut R, product_type: ProductType) -> String {
    let kind = product_type.abbreviation();
    match rng.gen_range(0..3) {
        0 => format!(
            "{}-{}F-{}-{}",
            pick(rng, &catalog::BUILDINGS),
            pick(rng, &catalog::FLOORS),
            kind,
            rng.gen_range(1..=99)
        ),
        1 => format!(
            "{}-{}-{}",
            pick(rng, &catalog::LOCATIONS),
            kind,
            rng.gen_range(1..=99)
        ),
        _ => format!(
            "{}-{}{}",
            pick(rng, &catalog::BUILDINGS),
            kind,
            rng.gen_range(1..=99)
        ),
    }
}

fn serial_chunk<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .filter_map(|_| catalog::SERIAL_ALPHABET.choose(rng))
        .map(|&symbol| symbol as char)
        .collect()
}

/// Serial in the `Q2XX-XXXX-XXXX` form. Every model currently shares one scheme.
pub fn synthesize_serial<R: Rng + ?Sized>(rng: &mut R, _model: &str) -> String {
    format!(
        "Q2{}-{}-{}",
        serial_chunk(rng, 2),
        serial_chunk(rng, 4),
        serial_chunk(rng, 4)
    )
}

pub fn synthesize_mac<R: Rng + ?Sized>(rng: &mut R) -> String {
    let octets: [u8; 6] = rng.gen();
    octets
        .iter()
        .map(|octet| format!("{:02x}", octet))
        .collect::<Vec<_>>()
        .join(":")
}

pub fn synthesize_network_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let digits: String = (0..15)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    format!("N_{}", digits)
}

/// Single-line US street address.
pub fn synthesize_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let (city, state) = catalog::CITIES.choose(rng).copied().unwrap_or_default();
    format!(
        "{} {} {} {}, {} {:05}",
        rng.gen_range(100..=9999),
        pick(rng, &catalog::STREET_NAMES),
        pick(rng, &catalog::STREET_SUFFIXES),
        city,
        state,
        rng.gen_range(10000..=99999)
    )
}

pub fn synthesize_sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(4..=9);
    let words: Vec<&str> = (0..count).map(|_| pick(rng, &catalog::NOTE_WORDS)).collect();
    let sentence = words.join(" ");
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

fn synthesize_firmware<R: Rng + ?Sized>(rng: &mut R, product_type: ProductType) -> String {
    let versions = catalog::firmware(product_type);
    if rng.gen_bool(0.7) {
        versions.current.to_string()
    } else {
        pick(rng, versions.legacy).to_string()
    }
}

fn synthesize_tags<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(0..=3);
    catalog::TAGS
        .choose_multiple(rng, count)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build one complete device for `customer`.
pub fn synthesize_device<R: Rng + ?Sized>(
    rng: &mut R,
    customer: &str,
    product_type: ProductType,
) -> DeviceRecord {
    let model = pick(rng, catalog::models(product_type)).to_string();
    let firmware = synthesize_firmware(rng, product_type);

    let config_updated = (Local::now() - Duration::days(rng.gen_range(1..=90)))
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string();

    // Continental US bounding box.
    let latitude = round6(rng.gen_range(25.0..=48.0));
    let longitude = round6(rng.gen_range(-125.0..=-65.0));

    let name = synthesize_name(rng, product_type);
    let serial = synthesize_serial(rng, &model);

    let address = rng.gen_bool(0.7).then(|| synthesize_address(rng));
    let lan_ip = rng.gen_bool(0.8).then(|| {
        format!(
            "192.168.{}.{}",
            rng.gen_range(1..=254),
            rng.gen_range(1..=254)
        )
    });
    let notes = rng.gen_bool(0.3).then(|| synthesize_sentence(rng));
    let tags = rng.gen_bool(0.5).then(|| synthesize_tags(rng));

    DeviceRecord {
        customer: customer.to_string(),
        address,
        config_updated,
        details: None,
        firmware,
        lan_ip,
        latitude,
        longitude,
        mac: synthesize_mac(rng),
        model,
        name,
        network_id: synthesize_network_id(rng),
        notes,
        product_type,
        url: catalog::device_url(&serial),
        serial,
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_device_fields_respect_catalog() {
        let mut rng = rng();
        for product_type in ProductType::ALL {
            for _ in 0..500 {
                let device = synthesize_device(&mut rng, "Acme Corporation", product_type);
                let firmware = catalog::firmware(product_type);

                assert_eq!(device.customer, "Acme Corporation");
                assert_eq!(device.product_type, product_type);
                assert!(catalog::models(product_type).contains(&device.model.as_str()));
                assert!(
                    device.firmware == firmware.current
                        || firmware.legacy.contains(&device.firmware.as_str())
                );
                assert!((25.0..=48.0).contains(&device.latitude));
                assert!((-125.0..=-65.0).contains(&device.longitude));
                assert_eq!(device.details, None);
                assert_eq!(
                    device.url,
                    format!(
                        "https://n149.meraki.com/o/-/manage/nodes/new_wired_status/{}",
                        device.serial
                    )
                );
            }
        }
    }

    #[test]
    fn test_identifier_formats() {
        let serial = Regex::new(r"^Q2[A-HJ-NP-Z2-9]{2}-[A-HJ-NP-Z2-9]{4}-[A-HJ-NP-Z2-9]{4}$").unwrap();
        let mac = Regex::new(r"^[0-9a-f]{2}(:[0-9a-f]{2}){5}$").unwrap();
        let network_id = Regex::new(r"^N_[0-9]{15}$").unwrap();
        let lan_ip = Regex::new(r"^192\.168\.(\d{1,3})\.(\d{1,3})$").unwrap();

        let mut rng = rng();
        for _ in 0..1000 {
            let device = synthesize_device(&mut rng, "Global Retail Co", ProductType::Switch);
            assert!(serial.is_match(&device.serial), "bad serial {}", device.serial);
            assert!(mac.is_match(&device.mac), "bad mac {}", device.mac);
            assert!(network_id.is_match(&device.network_id));
            if let Some(ip) = device.lan_ip {
                let caps = lan_ip.captures(&ip).unwrap();
                for group in 1..=2 {
                    let octet: u32 = caps[group].parse().unwrap();
                    assert!((1..=254).contains(&octet), "bad lan ip {}", ip);
                }
            }
        }
    }

    #[test]
    fn test_name_uses_type_abbreviation() {
        let mut rng = rng();
        for (product_type, abbreviation) in [
            (ProductType::Wireless, "AP"),
            (ProductType::Switch, "SW"),
            (ProductType::Appliance, "MX"),
        ] {
            for _ in 0..100 {
                let name = synthesize_name(&mut rng, product_type);
                assert!(name.contains(abbreviation), "{} missing {}", name, abbreviation);
                let suffix: String = name
                    .chars()
                    .rev()
                    .take_while(|c| c.is_ascii_digit())
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                let number: u32 = suffix.parse().unwrap();
                assert!((1..=99).contains(&number));
            }
        }
    }

    #[test]
    fn test_name_templates() {
        let building = catalog::BUILDINGS.join("|");
        let floor = catalog::FLOORS.join("|");
        let location = catalog::LOCATIONS.join("|");
        let templates = [
            Regex::new(&format!(r"^({building})-({floor})F-SW-[1-9][0-9]?$")).unwrap(),
            Regex::new(&format!(r"^({location})-SW-[1-9][0-9]?$")).unwrap(),
            Regex::new(&format!(r"^({building})-SW[1-9][0-9]?$")).unwrap(),
        ];

        let mut rng = rng();
        let draws = 30_000;
        let mut counts = [0u32; 3];
        for _ in 0..draws {
            let name = synthesize_name(&mut rng, ProductType::Switch);
            let matched: Vec<usize> = (0..templates.len())
                .filter(|&i| templates[i].is_match(&name))
                .collect();
            assert_eq!(matched.len(), 1, "{} matched {:?}", name, matched);
            counts[matched[0]] += 1;
        }
        for count in counts {
            assert!((count as f64 / draws as f64 - 1.0 / 3.0).abs() < 0.02);
        }
    }

    #[test]
    fn test_tag_count_is_uniform() {
        let mut rng = rng();
        let draws = 40_000;
        let mut counts = [0u32; 4];
        for _ in 0..draws {
            let tags = synthesize_tags(&mut rng);
            counts[tags.split_whitespace().count()] += 1;
        }
        for count in counts {
            assert!((count as f64 / draws as f64 - 0.25).abs() < 0.02);
        }
    }

    #[test]
    fn test_empty_tag_sample_is_present_but_blank() {
        let mut rng = rng();
        let mut blank = 0;
        for _ in 0..2000 {
            let device = synthesize_device(&mut rng, "Acme Corporation", ProductType::Switch);
            if device.tags.as_deref() == Some("") {
                blank += 1;
            }
        }
        // Half the devices carry tags and a quarter of those sample none.
        assert!(blank > 150 && blank < 350, "{} blank tag fields", blank);
    }

    #[test]
    fn test_tags_are_distinct_vocabulary_words() {
        let mut rng = rng();
        for _ in 0..1000 {
            let device = synthesize_device(&mut rng, "Metro School District", ProductType::Wireless);
            if let Some(tags) = device.tags {
                let words: Vec<&str> = tags.split_whitespace().collect();
                assert!(words.len() <= 3);
                for word in &words {
                    assert!(catalog::TAGS.contains(word));
                }
                let mut unique = words.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), words.len());
            }
        }
    }

    #[test]
    fn test_config_updated_is_within_ninety_days() {
        let mut rng = rng();
        let now = Local::now().naive_local();
        for _ in 0..200 {
            let device = synthesize_device(&mut rng, "Acme Corporation", ProductType::Appliance);
            let updated =
                NaiveDateTime::parse_from_str(&device.config_updated, "%Y-%m-%dT%H:%M:%S%.f")
                    .unwrap();
            let age = now - updated;
            assert!(age.num_days() >= 0);
            assert!(age.num_days() <= 91);
        }
    }

    #[test]
    fn test_coordinates_have_six_decimals() {
        let mut rng = rng();
        for _ in 0..200 {
            let device = synthesize_device(&mut rng, "Acme Corporation", ProductType::Wireless);
            assert_eq!(round6(device.latitude), device.latitude);
            assert_eq!(round6(device.longitude), device.longitude);
        }
    }

    #[test]
    fn test_optional_field_rates() {
        let mut rng = rng();
        let draws = 100_000;
        let (mut current, mut address, mut lan_ip, mut notes, mut tags) = (0, 0, 0, 0, 0);
        for _ in 0..draws {
            let device = synthesize_device(&mut rng, "Acme Corporation", ProductType::Wireless);
            if device.firmware == catalog::firmware(ProductType::Wireless).current {
                current += 1;
            }
            address += device.address.is_some() as u32;
            lan_ip += device.lan_ip.is_some() as u32;
            notes += device.notes.is_some() as u32;
            tags += device.tags.is_some() as u32;
        }
        let rate = |count: u32| count as f64 / draws as f64;
        assert!((rate(current) - 0.7).abs() < 0.01);
        assert!((rate(address) - 0.7).abs() < 0.01);
        assert!((rate(lan_ip) - 0.8).abs() < 0.01);
        assert!((rate(notes) - 0.3).abs() < 0.01);
        assert!((rate(tags) - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_sentence_shape() {
        let mut rng = rng();
        let sentence = synthesize_sentence(&mut rng);
        assert!(sentence.ends_with('.'));
        assert!(sentence.chars().next().unwrap().is_ascii_uppercase());
    }
}

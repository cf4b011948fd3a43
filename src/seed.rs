// Populate storage with a synthetic fleet and report firmware compliance.

use std::collections::HashSet;

use fleetreport_entity::prelude::ProductType;
use rand::Rng;
use sea_orm::DbErr;
use serde::Serialize;

use crate::catalog;
use crate::db::Storage;
use crate::synth::{self, DeviceRecord};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to prepare schema: {0}")]
    Schema(#[source] DbErr),

    #[error("failed to store devices: {0}")]
    Database(#[from] DbErr),
}

/// How many devices of one product type run its current firmware.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeCompliance {
    pub product_type: ProductType,
    pub current_firmware: &'static str,
    pub total: u64,
    pub compliant: u64,
    /// `None` when there are no devices of this type.
    pub percent: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeedSummary {
    pub customers: Vec<String>,
    pub devices: u64,
    pub product_types: Vec<TypeCompliance>,
}

/// Half wireless, 30% switches, 20% appliances, from a single uniform draw.
pub fn pick_product_type<R: Rng + ?Sized>(rng: &mut R) -> ProductType {
    let draw: f64 = rng.gen();
    if draw < 0.5 {
        ProductType::Wireless
    } else if draw < 0.8 {
        ProductType::Switch
    } else {
        ProductType::Appliance
    }
}

/// The first `num_customers` roster names; asking for more than the roster holds yields the whole roster.
pub fn roster(num_customers: usize) -> &'static [&'static str] {
    &catalog::CUSTOMERS[..num_customers.min(catalog::CUSTOMERS.len())]
}

/// Generate the whole fleet in memory, with no mac or serial repeated.
pub fn plan_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    customers: &[&str],
    devices_per_customer: usize,
) -> Vec<DeviceRecord> {
    let mut macs = HashSet::new();
    let mut serials = HashSet::new();
    let mut fleet = Vec::with_capacity(customers.len() * devices_per_customer);

    for customer in customers {
        log::debug!("creating devices for {}", customer);
        for _ in 0..devices_per_customer {
            let product_type = pick_product_type(rng);
            let mut device = synth::synthesize_device(rng, customer, product_type);
            while !macs.insert(device.mac.clone()) {
                device.mac = synth::synthesize_mac(rng);
            }
            while !serials.insert(device.serial.clone()) {
                device.serial = synth::synthesize_serial(rng, &device.model);
                device.url = catalog::device_url(&device.serial);
            }
            fleet.push(device);
        }
    }

    fleet
}

/// Per product type totals and how many of those run the current firmware.
pub async fn compliance_summary(storage: &Storage) -> Result<Vec<TypeCompliance>, DbErr> {
    let mut summary = Vec::with_capacity(ProductType::ALL.len());
    for product_type in ProductType::ALL {
        let current_firmware = catalog::firmware(product_type).current;
        let total = storage.count_devices(product_type, None).await?;
        let compliant = storage
            .count_devices(product_type, Some(current_firmware))
            .await?;
        let percent = (total > 0).then(|| compliant as f64 / total as f64 * 100.0);
        summary.push(TypeCompliance {
            product_type,
            current_firmware,
            total,
            compliant,
            percent,
        });
    }
    Ok(summary)
}

/// Replace the stored fleet with `devices_per_customer` fresh devices for each
/// of the first `num_customers` roster customers.
pub async fn seed_database(
    storage: &Storage,
    num_customers: usize,
    devices_per_customer: usize,
) -> Result<SeedSummary, SeedError> {
    storage.ensure_schema().await.map_err(SeedError::Schema)?;

    let customers = roster(num_customers);
    if customers.len() < num_customers {
        log::warn!(
            "only {} customers available, {} requested",
            customers.len(),
            num_customers
        );
    }
    log::info!("generating data for {} customers", customers.len());

    // The thread local generator must be gone before the next await.
    let fleet = {
        let mut rng = rand::thread_rng();
        plan_fleet(&mut rng, customers, devices_per_customer)
    };
    let devices = fleet.len() as u64;

    let deleted = storage.replace_devices(fleet).await?;
    log::info!(
        "replaced {} devices with {} devices for {} customers",
        deleted,
        devices,
        customers.len()
    );

    let product_types = compliance_summary(storage).await?;
    for compliance in &product_types {
        match compliance.percent {
            Some(percent) => log::info!(
                "{}: {}/{} ({:.1}% compliant)",
                compliance.product_type,
                compliance.compliant,
                compliance.total,
                percent
            ),
            None => log::info!("{}: no devices", compliance.product_type),
        }
    }

    Ok(SeedSummary {
        customers: customers.iter().map(|c| c.to_string()).collect(),
        devices,
        product_types,
    })
}

//! Syntetické datasety objednávok pre testy pipeline.

use crate::config::PipelineConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

const EXTRA_TIMESTAMPS: [&str; 4] = [
    "order_approved_at",
    "order_delivered_carrier_date",
    "order_delivered_customer_date",
    "order_estimated_delivery_date",
];

/// Konfigurácia pre dataset, ktorý má iba `order_purchase_timestamp`
pub fn scenario_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.preprocess.drop_columns = vec!["order_purchase_timestamp".to_string()];
    config
}

/// Objednávky s jedným časovým stĺpcom; `product_weight_g` chýba v každom 20. riadku
pub fn write_scenario_csv(dir: &Path, rows: usize) -> PathBuf {
    write_orders(dir.join("scenario.csv"), rows, false)
}

/// Objednávky so všetkými časovými stĺpcami datasetu Olist
pub fn write_olist_csv(dir: &Path, rows: usize) -> PathBuf {
    write_orders(dir.join("olist_customers.csv"), rows, true)
}

/// Len číselné stĺpce, bez chýbajúcich hodnôt
pub fn write_numeric_csv(dir: &Path, rows: usize) -> PathBuf {
    let path = dir.join("numeric.csv");
    let mut rng = StdRng::seed_from_u64(7);
    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer.write_record(["x1", "x2", "review_score"]).unwrap();
    for _ in 0..rows {
        let x1: f64 = rng.gen_range(0.0..10.0);
        let x2: f64 = rng.gen_range(0.0..10.0);
        let y = 1.0 + 0.3 * x1 - 0.2 * x2 + rng.gen_range(-0.5..0.5);
        writer
            .write_record([format!("{:.3}", x1), format!("{:.3}", x2), format!("{:.3}", y)])
            .unwrap();
    }
    writer.flush().unwrap();
    path
}

fn write_orders(path: PathBuf, rows: usize, all_timestamps: bool) -> PathBuf {
    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(&path).unwrap();

    let mut header = vec!["order_purchase_timestamp"];
    if all_timestamps {
        header.extend(EXTRA_TIMESTAMPS);
        header.push("order_status");
    }
    header.extend([
        "product_weight_g",
        "product_length_cm",
        "product_height_cm",
        "product_width_cm",
        "review_comment_message",
        "customer_zip_code_prefix",
        "order_item_id",
        "price",
        "freight_value",
        "review_score",
    ]);
    writer.write_record(&header).unwrap();

    for i in 0..rows {
        let day = i % 28 + 1;
        let mut record = vec![format!("2018-03-{:02} 10:{:02}:00", day, i % 60)];
        if all_timestamps {
            for offset in 1..=4 {
                record.push(format!("2018-04-{:02} 12:00:00", (day + offset) % 28 + 1));
            }
            record.push("delivered".to_string());
        }

        let freight: f64 = rng.gen_range(5.0..40.0);
        let score: u32 = if freight > 20.0 {
            rng.gen_range(1..=4)
        } else {
            rng.gen_range(3..=5)
        };
        let weight = if i % 20 == 0 {
            String::new()
        } else {
            format!("{}", rng.gen_range(100..5000))
        };
        let comment = if rng.gen_bool(0.4) { "" } else { "chegou antes do prazo" };

        record.extend([
            weight,
            format!("{}", rng.gen_range(15..80)),
            format!("{}", rng.gen_range(2..60)),
            format!("{}", rng.gen_range(10..50)),
            comment.to_string(),
            format!("{}", rng.gen_range(1000..99999)),
            format!("{}", rng.gen_range(1..4)),
            format!("{:.2}", rng.gen_range(10.0..500.0)),
            format!("{:.2}", freight),
            score.to_string(),
        ]);
        writer.write_record(&record).unwrap();
    }
    writer.flush().unwrap();
    path
}

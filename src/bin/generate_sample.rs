use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray, TimestampSecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Pick from `(item, weight)` pairs.
    fn weighted<'a>(&mut self, items: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for &(item, w) in items {
            if roll < w {
                return item;
            }
            roll -= w;
        }
        items[items.len() - 1].0
    }
}

struct Order {
    id: String,
    status: String,
    created_at: NaiveDateTime,
    /// Text written to the CSV date column; occasionally garbage.
    created_text: String,
    total_value: f64,
    product: String,
    quantity: i64,
    region: String,
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let statuses = [
        ("CONCLUÍDO", 0.62),
        ("CANCELADO", 0.12),
        ("ENVIADO", 0.14),
        ("A ENVIAR", 0.08),
        ("NÃO PAGO", 0.04),
    ];
    let products: [(&str, f64); 14] = [
        ("Capa de Silicone iPhone 13", 29.90),
        ("Película de Vidro 3D", 14.90),
        ("Cabo USB-C 2m Reforçado", 24.90),
        ("Carregador Turbo 20W", 59.90),
        ("Fone Bluetooth TWS", 89.90),
        ("Suporte Veicular Magnético", 34.90),
        ("Capa Carteira Galaxy A54", 39.90),
        ("Smartwatch D20", 79.90),
        ("Power Bank 10000mAh", 99.90),
        ("Ring Light 26cm", 49.90),
        ("Mouse Sem Fio", 44.90),
        ("Hub USB 4 Portas", 54.90),
        ("Caixa de Som Portátil", 119.90),
        ("Pulseira Mi Band", 19.90),
    ];
    let regions = ["SP", "RJ", "MG", "PR", "RS", "SC", "BA", "PE", "GO", "DF", "CE", "ES"];

    let start = NaiveDate::from_ymd_opt(2024, 8, 26)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let days = 21;

    let mut orders = Vec::new();
    for n in 0..1200u32 {
        let created_at = start
            + Duration::days(rng.below(days) as i64)
            + Duration::minutes(rng.below(24 * 60) as i64);
        let (product, price) = products[rng.below(products.len())];
        let quantity = 1 + rng.below(3) as i64;
        // roughly 1 in 100 rows carries an unparseable date
        let created_text = if rng.below(100) == 0 {
            "data inválida".to_string()
        } else {
            created_at.format("%Y-%m-%d %H:%M").to_string()
        };

        orders.push(Order {
            id: format!("2408{n:06}"),
            status: rng.weighted(&statuses).to_string(),
            created_at,
            created_text,
            total_value: (price * quantity as f64 * 100.0).round() / 100.0,
            product: product.to_string(),
            quantity,
            region: regions[rng.below(regions.len())].to_string(),
        });
    }

    write_csv("sample_orders.csv", &orders);
    write_parquet("sample_orders.parquet", &orders);

    println!("Wrote {} order lines to sample_orders.csv and sample_orders.parquet", orders.len());
}

fn write_csv(path: &str, orders: &[Order]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "ID do pedido",
            "Status do pedido",
            "Data de criação do pedido",
            "Valor Total",
            "Nome do Produto",
            "Quantidade",
            "UF",
        ])
        .expect("Failed to write header");
    for o in orders {
        let value = format!("{:.2}", o.total_value);
        let quantity = o.quantity.to_string();
        writer
            .write_record([
                o.id.as_str(),
                o.status.as_str(),
                o.created_text.as_str(),
                value.as_str(),
                o.product.as_str(),
                quantity.as_str(),
                o.region.as_str(),
            ])
            .expect("Failed to write record");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(path: &str, orders: &[Order]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("ID do pedido", DataType::Utf8, false),
        Field::new("Status do pedido", DataType::Utf8, false),
        Field::new(
            "Data de criação do pedido",
            DataType::Timestamp(TimeUnit::Second, None),
            false,
        ),
        Field::new("Valor Total", DataType::Float64, false),
        Field::new("Nome do Produto", DataType::Utf8, false),
        Field::new("Quantidade", DataType::Int64, false),
        Field::new("UF", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(orders.iter().map(|o| o.id.as_str()))),
            Arc::new(StringArray::from_iter_values(orders.iter().map(|o| o.status.as_str()))),
            Arc::new(TimestampSecondArray::from(
                orders
                    .iter()
                    .map(|o| o.created_at.and_utc().timestamp())
                    .collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                orders.iter().map(|o| o.total_value).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from_iter_values(orders.iter().map(|o| o.product.as_str()))),
            Arc::new(Int64Array::from(
                orders.iter().map(|o| o.quantity).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from_iter_values(orders.iter().map(|o| o.region.as_str()))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

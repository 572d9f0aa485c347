use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use excel_filter::TableSettings;
use rust_xlsxwriter::{Format, Workbook};

/// Seeded splitmix64 stream; the sample workbook is the same on every run.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

const FIRST_NAMES: [&str; 6] = ["Анна", "Иван", "Мария", "Пётр", "Ольга", "Сергей"];
const LAST_NAMES: [&str; 6] = ["Иванов", "Петров", "Смирнов", "Кузнецов", "Попов", "Соколов"];
const DEPARTMENTS: [&str; 4] = ["Бухгалтерия", "Отдел продаж", "ИТ", "Склад"];
const POSITIONS: [&str; 4] = ["Специалист", "Ведущий специалист", "Менеджер", "Руководитель"];

/// Write a sample employee list: a title row, a blank spacer, the header row
/// with the marker cell, then employees with a few blank cells.
///
/// Usage: `generate_sample [output.xlsx]`
fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_employees.xlsx"));

    let settings = TableSettings::default();
    let mut rng = SampleRng(42);

    let mut header = vec![settings.header_marker.clone(), "Табельный номер".to_string()];
    header.extend(settings.default_output_columns.iter().cloned());

    let bold = Format::new().set_bold();
    let date_format = Format::new().set_num_format(&settings.output_date_format);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string_with_format(0, 0, "Список сотрудников", &bold)?;
    for (col, name) in header.iter().enumerate() {
        sheet.write_string_with_format(2, col as u16, name, &bold)?;
    }

    let first_hire = NaiveDate::from_ymd_opt(2015, 1, 1).context("invalid start date")?;
    let rows = 60u32;
    for i in 0..rows {
        let row = 3 + i;
        let name = format!(
            "{} {}",
            rng.pick(&LAST_NAMES),
            rng.pick(&FIRST_NAMES)
        );
        let hired = first_hire + Duration::days(rng.below(3650) as i64);
        let salary = 40_000 + 1_000 * rng.below(80) as i64;

        sheet.write_number(row, 0, (i + 1) as f64)?;
        // Some employees have no personnel number yet.
        if i % 7 != 3 {
            sheet.write_number(row, 1, (1000 + rng.below(9000)) as f64)?;
        }
        sheet.write_string(row, 2, &name)?;
        sheet.write_string(row, 3, rng.pick(&POSITIONS))?;
        sheet.write_string(row, 4, rng.pick(&DEPARTMENTS))?;
        sheet.write_datetime_with_format(row, 5, &hired, &date_format)?;
        sheet.write_number(row, 6, salary as f64)?;
    }
    sheet.autofit();

    workbook
        .save(&output_path)
        .with_context(|| format!("saving {}", output_path.display()))?;

    log::info!("Wrote {rows} employees to {}", output_path.display());
    println!("Wrote {rows} employees to {}", output_path.display());
    Ok(())
}

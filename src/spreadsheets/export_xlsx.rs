use crate::errors::{ResultResp, ServerError};
use crate::report::NeighborhoodRecord;
use crate::responses::xlsx_response;
use rust_xlsxwriter::{Format, Workbook};

pub const HEADERS: [&str; 3] = ["Neighborhood", "Avg Price ($)", "Rental Yield (%)"];

pub fn export_records_xlsx(records: &[NeighborhoodRecord], city: &str) -> ResultResp {
    let buffer = records_workbook(records)?;
    xlsx_response(buffer, &export_filename(city))
}

/// One sheet: a header row, then one row per neighborhood.
pub fn records_workbook(records: &[NeighborhoodRecord]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();
    let dollars = Format::new().set_num_format("$#,##0");

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, record) in records.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &record.name)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write name: {}", e)))?;

        worksheet
            .write_number_with_format(r, 1, record.avg_price, &dollars)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write price: {}", e)))?;

        worksheet
            .write_number(r, 2, record.rental_yield_pct)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write yield: {}", e)))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

/// `neighborhoods_<city>.xlsx`, with anything outside `[A-Za-z0-9_-]` turned into `_`.
pub fn export_filename(city: &str) -> String {
    let slug: String = city
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("neighborhoods_{slug}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_header_safe() {
        assert_eq!(export_filename("Berlin"), "neighborhoods_Berlin.xlsx");
        assert_eq!(export_filename(" New York "), "neighborhoods_New_York.xlsx");
        assert_eq!(export_filename("a\"b;c"), "neighborhoods_a_b_c.xlsx");
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let records = vec![NeighborhoodRecord {
            name: "Mitte".into(),
            avg_price: 1_500_000.0,
            rental_yield_pct: 4.5,
        }];

        let buffer = records_workbook(&records).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }
}

use chrono::{Datelike, Local, NaiveDate};

use crate::cli::PrintArgs;
use crate::model::{InvoiceSettings, WaterRounding};

use super::defaults::*;

/// Runtime settings for document rendering
#[derive(Debug, Clone)]
pub struct Settings {
    // Portrait page dimensions in mm; landscape documents swap them
    pub page_width: f32,
    pub page_height: f32,

    /// Date printed on invoices and total sheets, and used in file names
    pub print_date: NaiveDate,

    /// Anchor total sheet tables to the bottom of the page
    pub bottom_up: bool,
    /// Print the block/date title above total sheet tables
    pub include_date: bool,

    pub water_rounding: WaterRounding,

    /// Footer lines centred at the bottom of each invoice
    pub remarks: Vec<String>,

    // Typography (in points)
    pub title_font_size: f32,
    pub header_font_size: f32,
    pub body_font_size: f32,

    pub border_thickness: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            print_date: default_print_date(Local::now().date_naive()),
            bottom_up: false,
            include_date: true,
            water_rounding: WaterRounding::default(),
            remarks: InvoiceSettings::default().remarks,
            title_font_size: DEFAULT_TITLE_FONT_SIZE,
            header_font_size: DEFAULT_HEADER_FONT_SIZE,
            body_font_size: DEFAULT_BODY_FONT_SIZE,
            border_thickness: DEFAULT_BORDER_THICKNESS,
        }
    }
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_args(args: &PrintArgs) -> Self {
        let (page_width, page_height) = args.page_size.dimensions_mm();

        let mut settings = Self {
            page_width,
            page_height,
            bottom_up: args.bottom_up,
            include_date: !args.no_date,
            ..Self::default()
        };

        if let Some(date) = args.date {
            settings.print_date = date;
        }
        if args.round_water {
            settings.water_rounding = WaterRounding::RoundUp;
        }

        settings
    }

    /// Take invoice remarks from the ledger; an empty list keeps the defaults
    pub fn with_invoice_settings(mut self, invoice: &InvoiceSettings) -> Self {
        if !invoice.remarks.is_empty() {
            self.remarks = invoice.remarks.clone();
        }
        self
    }

    pub fn with_print_date(mut self, date: NaiveDate) -> Self {
        self.print_date = date;
        self
    }

    /// Page dimensions for landscape documents (width, height)
    pub fn landscape(&self) -> (f32, f32) {
        (
            self.page_width.max(self.page_height),
            self.page_width.min(self.page_height),
        )
    }
}

/// The 10th of `today`'s month, the usual billing day
pub fn default_print_date(today: NaiveDate) -> NaiveDate {
    today.with_day(DEFAULT_PRINT_DAY).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Args, Command};
    use clap::Parser;

    fn print_args(extra: &[&str]) -> PrintArgs {
        let mut argv = vec!["unit-ledger", "print", "ledger.json"];
        argv.extend_from_slice(extra);
        match Args::parse_from(argv).command {
            Command::Print(args) => args,
            other => panic!("expected print, got {:?}", other),
        }
    }

    #[test]
    fn test_default_print_date() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            default_print_date(today),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
        );
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.page_width, A4_WIDTH);
        assert_eq!(settings.print_date.day(), DEFAULT_PRINT_DAY);
        assert!(settings.include_date);
        assert!(!settings.bottom_up);
        assert_eq!(settings.water_rounding, WaterRounding::Exact);
        assert_eq!(settings.remarks.len(), 2);
    }

    #[test]
    fn test_from_args() {
        let settings = Settings::from_args(&print_args(&[
            "--date",
            "2024-05-03",
            "--bottom-up",
            "--no-date",
            "--round-water",
            "-s",
            "letter",
        ]));
        assert_eq!(settings.print_date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
        assert!(settings.bottom_up);
        assert!(!settings.include_date);
        assert_eq!(settings.water_rounding, WaterRounding::RoundUp);
        assert_eq!(settings.page_width, 215.9);
    }

    #[test]
    fn test_landscape() {
        let (w, h) = Settings::default().landscape();
        assert_eq!((w, h), (A4_HEIGHT, A4_WIDTH));
    }

    #[test]
    fn test_with_invoice_settings() {
        let custom = InvoiceSettings {
            remarks: vec!["Pay by the 15th".to_string()],
        };
        let settings = Settings::default().with_invoice_settings(&custom);
        assert_eq!(settings.remarks, vec!["Pay by the 15th".to_string()]);

        let empty = InvoiceSettings { remarks: vec![] };
        let settings = Settings::default().with_invoice_settings(&empty);
        assert_eq!(settings.remarks.len(), 2);
    }
}

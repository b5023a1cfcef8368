//! Flat, one-row-per-record view of a result set.

use crate::types::record::JobRecord;

/// Header row of tabular reports, in column order.
pub const REPORT_COLUMNS: [&str; 13] = [
    "Company Name",
    "Job Title",
    "Recruiter",
    "Email",
    "Phone",
    "Location",
    "Summary",
    "Link",
    "Posted Date",
    "Source",
    "Still Available",
    "Department",
    "Scraped On",
];

/// Cells for one record, aligned with [`REPORT_COLUMNS`].
pub fn record_row(record: &JobRecord) -> [&str; 13] {
    [
        record.company_name.as_str(),
        record.job_title.as_str(),
        record.recruiter.as_str(),
        record.email.as_str(),
        record.phone.as_str(),
        record.location.as_str(),
        record.summary.as_str(),
        record.application_link.as_str(),
        record.posted_date.as_str(),
        record.source_url.as_str(),
        record.still_available.as_str(),
        record.job_department.as_str(),
        record.scraped_on.as_str(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_follows_header_order() {
        let record = JobRecord {
            company_name: "Acme Law".to_string(),
            job_title: "Legal Intern".to_string(),
            application_link: "https://acme.test/apply".to_string(),
            source_url: "https://lawctopus.com/internship/acme".to_string(),
            scraped_on: "2024-06-01 09:30".to_string(),
            ..Default::default()
        };
        let row = record_row(&record);

        let cell = |header: &str| {
            let idx = REPORT_COLUMNS.iter().position(|h| *h == header).unwrap();
            row[idx]
        };
        assert_eq!(cell("Company Name"), "Acme Law");
        assert_eq!(cell("Job Title"), "Legal Intern");
        assert_eq!(cell("Link"), "https://acme.test/apply");
        assert_eq!(cell("Source"), "https://lawctopus.com/internship/acme");
        assert_eq!(cell("Scraped On"), "2024-06-01 09:30");
        assert_eq!(cell("Recruiter"), "");
    }
}

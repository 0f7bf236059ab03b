//! Illustrative candidates written when the spreadsheet is first created

use super::schema::DATE_FORMAT;
use super::value::{CandidateRecord, FieldValue};

fn record(date: &str, pairs: &[(&str, &str)]) -> CandidateRecord {
    let mut record: CandidateRecord = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
        .collect();
    record.insert("Date".to_string(), FieldValue::from(date));
    record
}

/// Demo state for a first run
///
/// The third candidate has no `Name`; absent fields are stored empty.
/// Two records use the legacy `Initial Remarks` alias.
pub fn seed_records() -> Vec<CandidateRecord> {
    let now = chrono::Local::now().format(DATE_FORMAT).to_string();

    vec![
        record(
            &now,
            &[
                ("Name", "John Doe"),
                ("Email ID", "john.doe@example.com"),
                ("Contact Number", "9876543210"),
                ("Interested Position", "Software Developer"),
                ("Current Role", "Junior Developer"),
                ("Current Organization", "Tech Solutions Inc."),
                ("Current Location", "Bangalore"),
                ("Current CTC per Annum", "800000"),
                ("Expected CTC per Annum", "1200000"),
                ("Total Years of Experience", "2-3 years"),
                ("Notice Period", "30 days"),
                ("In Notice", "Yes"),
                ("Immediate Joiner", "No"),
                ("Offers in Hand", "No"),
                ("Offered CTC", ""),
                ("Location Preference", "Bangalore"),
                ("Certifications", "AWS Certified Developer"),
                ("Resume", "https://example.com/resume/johndoe"),
                ("LinkedIn Profile", "https://linkedin.com/in/johndoe"),
                ("Comments", "Good communication skills"),
                ("Referred By", "Employee Referral"),
                ("Interview Status", "Scheduled"),
                ("Application Status", "In Process"),
                ("Remarks", "Promising candidate"),
                ("Reject Mail Sent", "No"),
                ("Initial Screening", "Candidate performed well in initial screening."),
                ("Round 1 Remarks", "Strong technical skills demonstrated in Round 1."),
                ("Round 2 Remarks", "Good problem-solving approach in Round 2."),
                ("Final Remarks", ""),
                ("Month Count", "1"),
                ("Reference", "Jane Smith"),
            ],
        ),
        record(
            &now,
            &[
                ("Name", "Jane Smith"),
                ("Email ID", "jane.smith@example.com"),
                ("Contact Number", "8765432109"),
                ("Interested Position", "Data Scientist"),
                ("Current Role", "Data Analyst"),
                ("Current Organization", "Data Insights Ltd."),
                ("Current Location", "Hyderabad"),
                ("Current CTC per Annum", "1000000"),
                ("Expected CTC per Annum", "1500000"),
                ("Total Years of Experience", "3-5 years"),
                ("Notice Period", "60 days"),
                ("In Notice", "No"),
                ("Immediate Joiner", "No"),
                ("Offers in Hand", "Yes"),
                ("Offered CTC", "1400000"),
                ("Location Preference", "Remote"),
                ("Certifications", "Google Data Analytics"),
                ("Resume", "https://example.com/resume/janesmith"),
                ("LinkedIn Profile", "https://linkedin.com/in/janesmith"),
                ("Comments", "Strong analytical skills"),
                ("Referred By", "Job Portal"),
                ("Interview Status", "Selected"),
                ("Application Status", "Offer Made"),
                ("Remarks", "Top candidate"),
                ("Reject Mail Sent", "No"),
                ("Initial Remarks", ""),
                ("Round 1 Remarks", ""),
                ("Round 2 Remarks", ""),
                ("Final Remarks", "Waiting for candidate response"),
                ("Month Count", "2"),
                ("Reference", "Robert Johnson"),
            ],
        ),
        record(
            &now,
            &[
                ("Email ID", "sam.wilson@example.com"),
                ("Contact Number", "7654321098"),
                ("Interested Position", "UI/UX Designer"),
                ("Current Role", "Graphic Designer"),
                ("Current Organization", "Creative Designs"),
                ("Current Location", "Chennai"),
                ("Current CTC per Annum", "700000"),
                ("Expected CTC per Annum", "1000000"),
                ("Total Years of Experience", "1-2 years"),
                ("Notice Period", "15 days"),
                ("In Notice", "Yes"),
                ("Immediate Joiner", "Yes"),
                ("Offers in Hand", "No"),
                ("Offered CTC", ""),
                ("Location Preference", "Chennai"),
                ("Certifications", "Adobe Certified Expert"),
                ("Resume", "https://example.com/resume/samwilson"),
                ("LinkedIn Profile", "https://linkedin.com/in/samwilson"),
                ("Comments", "Creative portfolio"),
                ("Referred By", "Campus Recruitment"),
                ("Interview Status", "Rejected"),
                ("Application Status", "Rejected"),
                ("Remarks", "Not enough experience"),
                ("Reject Mail Sent", "Yes"),
                ("Initial Remarks", ""),
                ("Round 1 Remarks", ""),
                ("Round 2 Remarks", ""),
                ("Final Remarks", "Consider for junior positions"),
                ("Month Count", "1"),
                ("Reference", "Emily Davis"),
            ],
        ),
    ]
}

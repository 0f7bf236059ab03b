//! Fixed choice lists for the candidate form

use axum::Json;
use std::collections::BTreeMap;

const LOCATIONS: &[&str] = &[
    "Bangalore",
    "Chennai",
    "Hyderabad",
    "Mumbai",
    "Delhi",
    "Pune",
    "Kolkata",
    "Remote",
];

const YES_NO: &[&str] = &["Yes", "No"];

/// Field name to allowed values
pub const DROPDOWN_OPTIONS: &[(&str, &[&str])] = &[
    (
        "Interested Position",
        &[
            "Backend Developer",
            "Frontend Developer",
            "Full Stack Developer",
            "DevOps Engineer",
            "Data Engineer",
            "Data Scientist",
            "UI/UX Designer",
            "Product Manager",
            "QA Engineer",
        ],
    ),
    (
        "Current Role",
        &[
            "Software Engineer",
            "Senior Software Engineer",
            "Lead Engineer",
            "Engineering Manager",
            "Architect",
            "QA Engineer",
            "DevOps Engineer",
            "Data Engineer",
            "Data Scientist",
            "Product Manager",
            "UI/UX Designer",
        ],
    ),
    ("Current Location", LOCATIONS),
    ("Location Preference", LOCATIONS),
    (
        "Total Years of Experience",
        &["0-1 years", "1-2 years", "2-3 years"],
    ),
    (
        "Notice Period",
        &["Immediate", "15 days", "30 days", "60 days", "90 days"],
    ),
    ("In Notice", YES_NO),
    ("Immediate Joiner", YES_NO),
    ("Offers in Hand", YES_NO),
    (
        "Interview Status",
        &[
            "Applied",
            "Profile Screening Comp",
            "Voice Screening Comp",
            "Tech Inter Sched",
            "Tech Inter Comp",
            "Code Inter Sched",
            "Code Inter Comp",
            "HR Inter Sched",
            "HR Inter Comp",
            "Offer",
            "Pending Final Noti",
            "References",
            "All Completed",
        ],
    ),
    (
        "Application Status",
        &[
            "Proceed Further",
            "On Hold",
            "No Resp Call/Email",
            "Did Not Join",
            "Sent",
            "Recieved",
            "In Notice",
            "Accepted",
            "Rejected",
            "Joined",
        ],
    ),
    ("Reject Mail Sent", YES_NO),
];

/// GET /api/dropdown-options
pub async fn get_dropdown_options() -> Json<BTreeMap<&'static str, &'static [&'static str]>> {
    Json(DROPDOWN_OPTIONS.iter().copied().collect())
}

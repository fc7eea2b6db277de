use crate::models::water_test::WaterTest;
use crate::time::format_local;

pub const HIGH_RISK_ALERT_PREFIX: &str = "🚨 High Risk Water Quality detected at ";

/// In-app alert shown to leaders for a medium-risk test.
pub fn leader_alert_message(test: &WaterTest) -> String {
    format!(
        "⚠️ Medium Water Quality detected at {} ({})",
        test.waterbody_name, test.location
    )
}

/// In-app alert shown to everyone for a high-risk test.
pub fn global_alert_message(test: &WaterTest) -> String {
    format!(
        "{}{} ({})",
        HIGH_RISK_ALERT_PREFIX, test.waterbody_name, test.location
    )
}

pub fn medium_risk_text(test: &WaterTest) -> String {
    format!(
        "⚠️ Medium Water Quality Alert\n\
         Waterbody: {}\n\
         Location: {}\n\
         Tested: {}\n\
         Please review the report and plan follow-up testing.",
        test.waterbody_name,
        test.location,
        format_local(test.date_time)
    )
}

pub fn high_risk_text(test: &WaterTest) -> String {
    format!(
        "🚨 HIGH RISK ALERT\n\
         Unsafe water quality reported.\n\
         Waterbody: {}\n\
         Location: {}\n\
         Tested: {}\n\
         Do not use this water source until further notice.",
        test.waterbody_name,
        test.location,
        format_local(test.date_time)
    )
}

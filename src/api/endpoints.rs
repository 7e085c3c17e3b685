//! URL builders for the plant backend. Date formats differ per endpoint
//! (the graph and report routes take ISO dates, the average-energy route a
//! day-first one); the formats here match what the backend actually serves.

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn machines(&self) -> String {
        format!("{}/machines/", self.base)
    }

    pub fn all_machine_states(&self) -> String {
        format!("{}/all_machine_states", self.base)
    }

    pub fn live_recent(&self, machine_id: i64) -> String {
        format!("{}/live/live_recent/{machine_id}", self.base)
    }

    /// Status intervals for one machine on one day.
    pub fn production_graph(&self, machine_id: i64, date: NaiveDate) -> String {
        format!(
            "{}/prod_graph/get_production_data?machine_id={machine_id}&date={}",
            self.base,
            date.format("%Y-%m-%d")
        )
    }

    /// Status intervals for every machine on one day.
    pub fn graph_data(&self, date: NaiveDate) -> String {
        format!(
            "{}/prod_graph/get_graph_data?date={}",
            self.base,
            date.format("%Y-%m-%d")
        )
    }

    pub fn shift_live_history(&self, date: NaiveDate) -> String {
        format!(
            "{}/shift_live_history/?date={}",
            self.base,
            date.format("%Y-%m-%d")
        )
    }

    pub fn total_energy_costs(&self, date: NaiveDate) -> String {
        format!(
            "{}/report/total_energy_costs?date={}",
            self.base,
            date.format("%Y-%m-%d")
        )
    }

    /// The backend wants a full midnight timestamp here, with the colons
    /// percent-encoded.
    pub fn daily_energy_consumption(&self, date: NaiveDate) -> String {
        format!(
            "{}/report/daily_energy_consumption?date={}T00%3A00%3A00",
            self.base,
            date.format("%Y-%m-%d")
        )
    }

    /// Day-first date format, unlike every other route.
    pub fn average_energy_time(&self, machine_id: i64, date: NaiveDate) -> String {
        format!(
            "{}/report/average_energy_time?machine_id={machine_id}&date={}",
            self.base,
            date.format("%d-%m-%Y")
        )
    }

    pub fn auth(&self) -> String {
        format!("{}/auth", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new("http://172.18.7.91:9900/")
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        assert_eq!(endpoints().base(), "http://172.18.7.91:9900");
    }

    #[test]
    fn graph_routes_use_iso_dates() {
        assert_eq!(
            endpoints().production_graph(4, day()),
            "http://172.18.7.91:9900/prod_graph/get_production_data?machine_id=4&date=2024-03-14"
        );
        assert_eq!(
            endpoints().graph_data(day()),
            "http://172.18.7.91:9900/prod_graph/get_graph_data?date=2024-03-14"
        );
    }

    #[test]
    fn average_energy_uses_day_first_dates() {
        assert_eq!(
            endpoints().average_energy_time(2, day()),
            "http://172.18.7.91:9900/report/average_energy_time?machine_id=2&date=14-03-2024"
        );
    }

    #[test]
    fn daily_energy_encodes_midnight_timestamp() {
        assert_eq!(
            endpoints().daily_energy_consumption(day()),
            "http://172.18.7.91:9900/report/daily_energy_consumption?date=2024-03-14T00%3A00%3A00"
        );
    }

    #[test]
    fn live_and_registry_routes() {
        assert_eq!(endpoints().machines(), "http://172.18.7.91:9900/machines/");
        assert_eq!(
            endpoints().live_recent(7),
            "http://172.18.7.91:9900/live/live_recent/7"
        );
        assert_eq!(
            endpoints().all_machine_states(),
            "http://172.18.7.91:9900/all_machine_states"
        );
        assert_eq!(
            endpoints().shift_live_history(day()),
            "http://172.18.7.91:9900/shift_live_history/?date=2024-03-14"
        );
    }
}

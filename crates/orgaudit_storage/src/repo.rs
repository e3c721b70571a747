#![forbid(unsafe_code)]

use orgaudit_contracts::employee::{EmployeeId, EmployeeRecord};
use orgaudit_contracts::roster::RosterView;

use crate::roster::RosterStore;

impl RosterView for RosterStore {
    fn employee(&self, id: EmployeeId) -> Option<&EmployeeRecord> {
        self.get(id)
    }

    fn direct_reports(&self, manager_id: EmployeeId) -> Vec<&EmployeeRecord> {
        self.direct_reports_of(manager_id)
    }

    fn employees(&self) -> Vec<&EmployeeRecord> {
        self.all_employees().collect()
    }

    fn manager_ids_with_reports(&self) -> Vec<EmployeeId> {
        self.managers_with_reports().map(|(id, _)| id).collect()
    }
}

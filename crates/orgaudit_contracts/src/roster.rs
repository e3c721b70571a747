#![forbid(unsafe_code)]

use crate::employee::{EmployeeId, EmployeeRecord};

/// Read-only view of a loaded roster. Auditors only ever see a roster through this trait.
pub trait RosterView {
    fn employee(&self, id: EmployeeId) -> Option<&EmployeeRecord>;

    /// Direct reports of `manager_id` in load order; empty when there are none.
    fn direct_reports(&self, manager_id: EmployeeId) -> Vec<&EmployeeRecord>;

    /// Every employee in load order.
    fn employees(&self) -> Vec<&EmployeeRecord>;

    /// Ids referenced as a manager by at least one employee, ascending.
    ///
    /// An id in this list need not resolve through `employee`.
    fn manager_ids_with_reports(&self) -> Vec<EmployeeId>;
}

//! Employee, shift and attendance endpoints.

use serde::Serialize;
use till_core::model::{Employee, NewShift, Shift};

use crate::{Ack, ApiClient, Result};

#[derive(Debug, Serialize)]
struct AttendanceBody {
    user_id: i64,
}

impl ApiClient {
    pub fn employees(&self) -> Result<Vec<Employee>> {
        self.get_json("/users/all")
    }

    pub fn shifts_for(&self, user_id: i64) -> Result<Vec<Shift>> {
        self.get_json(&format!("/shifts/{user_id}"))
    }

    pub fn create_shift(&self, body: &NewShift) -> Result<Shift> {
        self.post_json("/shifts", body)
    }

    pub fn clock_in(&self, user_id: i64) -> Result<Ack> {
        self.post_json("/attendance/clockin", &AttendanceBody { user_id })
    }

    pub fn clock_out(&self, user_id: i64) -> Result<Ack> {
        self.post_json("/attendance/clockout", &AttendanceBody { user_id })
    }
}

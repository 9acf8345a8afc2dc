// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod types;

use crate::Period;
use time::Time;

pub fn create_test_period(name: &str, start: (u8, u8), end: (u8, u8)) -> Period {
    Period {
        id: None,
        name: String::from(name),
        start_time: Time::from_hms(start.0, start.1, 0).unwrap(),
        end_time: Time::from_hms(end.0, end.1, 0).unwrap(),
    }
}

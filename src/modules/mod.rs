pub mod academic_years;
pub mod areas;
pub mod assignments;
pub mod campuses;
pub mod grades;
pub mod groups;
pub mod guardians;
pub mod institutions;
pub mod schedule_slots;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

use utoipa::OpenApi;

use aula_core::pagination::Paginated;
use aula_models::academic_years::{
    AcademicYear, CreateAcademicYearDto, CreatePeriodDto, Period, UpdateAcademicYearDto,
    UpdatePeriodDto,
};
use aula_models::areas::{Area, CreateAreaDto, UpdateAreaDto};
use aula_models::assignments::{Assignment, CreateAssignmentDto, UpdateAssignmentDto};
use aula_models::campuses::{Campus, CreateCampusDto, UpdateCampusDto};
use aula_models::grades::{CreateGradeDto, Grade, UpdateGradeDto};
use aula_models::groups::{
    CreateGroupDto, Group, GroupDetail, TransferStudentDto, UpdateGroupDto,
};
use aula_models::guardians::{CreateGuardianDto, Guardian, UpdateGuardianDto};
use aula_models::institutions::{CreateInstitutionDto, Institution, UpdateInstitutionDto};
use aula_models::schedule_slots::{
    CreateScheduleSlotDto, ScheduleSlot, UpdateScheduleSlotDto,
};
use aula_models::students::{CreateStudentDto, Student, UpdateStudentDto};
use aula_models::subjects::{CreateSubjectDto, Subject, UpdateSubjectDto};
use aula_models::teachers::{CreateTeacherDto, Teacher, UpdateTeacherDto};
use aula_models::users::{CreateUserDto, Role, UpdateUserDto, User};

use crate::utils::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::institutions::controller::create_institution,
        crate::modules::institutions::controller::get_institutions,
        crate::modules::institutions::controller::get_institution,
        crate::modules::institutions::controller::update_institution,
        crate::modules::institutions::controller::update_institution_form,
        crate::modules::institutions::controller::delete_institution,
        crate::modules::campuses::controller::create_campus,
        crate::modules::campuses::controller::get_campuses,
        crate::modules::campuses::controller::get_campus,
        crate::modules::campuses::controller::update_campus,
        crate::modules::campuses::controller::delete_campus,
        crate::modules::academic_years::controller::create_year,
        crate::modules::academic_years::controller::get_years,
        crate::modules::academic_years::controller::get_year,
        crate::modules::academic_years::controller::update_year,
        crate::modules::academic_years::controller::delete_year,
        crate::modules::academic_years::controller::get_periods,
        crate::modules::academic_years::controller::get_period,
        crate::modules::academic_years::controller::create_period,
        crate::modules::academic_years::controller::update_period,
        crate::modules::academic_years::controller::delete_period,
        crate::modules::grades::controller::create_grade,
        crate::modules::grades::controller::get_grades,
        crate::modules::grades::controller::get_grade,
        crate::modules::grades::controller::update_grade,
        crate::modules::grades::controller::delete_grade,
        crate::modules::groups::controller::create_group,
        crate::modules::groups::controller::get_groups,
        crate::modules::groups::controller::get_group,
        crate::modules::groups::controller::update_group,
        crate::modules::groups::controller::delete_group,
        crate::modules::groups::controller::transfer_student,
        crate::modules::areas::controller::create_area,
        crate::modules::areas::controller::get_areas,
        crate::modules::areas::controller::get_area,
        crate::modules::areas::controller::update_area,
        crate::modules::areas::controller::delete_area,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::guardians::controller::create_guardian,
        crate::modules::guardians::controller::get_guardians,
        crate::modules::guardians::controller::get_guardian,
        crate::modules::guardians::controller::update_guardian,
        crate::modules::guardians::controller::delete_guardian,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::get_roles,
        crate::modules::schedule_slots::controller::get_slots,
        crate::modules::schedule_slots::controller::get_slot,
        crate::modules::schedule_slots::controller::create_slot,
        crate::modules::schedule_slots::controller::update_slot,
        crate::modules::schedule_slots::controller::delete_slot,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::assignments::controller::get_assignments,
        crate::modules::assignments::controller::get_assignment,
        crate::modules::assignments::controller::update_assignment,
        crate::modules::assignments::controller::delete_assignment,
    ),
    components(
        schemas(
            Institution,
            CreateInstitutionDto,
            UpdateInstitutionDto,
            Campus,
            CreateCampusDto,
            UpdateCampusDto,
            AcademicYear,
            CreateAcademicYearDto,
            UpdateAcademicYearDto,
            Period,
            CreatePeriodDto,
            UpdatePeriodDto,
            Grade,
            CreateGradeDto,
            UpdateGradeDto,
            Group,
            GroupDetail,
            CreateGroupDto,
            UpdateGroupDto,
            TransferStudentDto,
            Area,
            CreateAreaDto,
            UpdateAreaDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            Guardian,
            CreateGuardianDto,
            UpdateGuardianDto,
            User,
            CreateUserDto,
            UpdateUserDto,
            Role,
            ScheduleSlot,
            CreateScheduleSlotDto,
            UpdateScheduleSlotDto,
            Assignment,
            CreateAssignmentDto,
            UpdateAssignmentDto,
            ErrorResponse,
            Paginated<Institution>,
            Paginated<Campus>,
            Paginated<AcademicYear>,
            Paginated<Grade>,
            Paginated<Group>,
            Paginated<Area>,
            Paginated<Subject>,
            Paginated<Student>,
            Paginated<Teacher>,
            Paginated<Guardian>,
            Paginated<User>,
            Paginated<Assignment>,
        )
    ),
    tags(
        (name = "Institutions", description = "Institution management"),
        (name = "Campuses", description = "Campus (sede) management"),
        (name = "Academic years", description = "Academic years and their periods"),
        (name = "Grades", description = "Grade catalog"),
        (name = "Groups", description = "Groups, enrollment and transfers"),
        (name = "Areas", description = "Academic areas"),
        (name = "Subjects", description = "Subjects within areas"),
        (name = "Students", description = "Student management"),
        (name = "Teachers", description = "Teacher management"),
        (name = "Guardians", description = "Guardian management"),
        (name = "Users", description = "Administrative users and roles"),
        (name = "Schedule slots", description = "Institution schedule slots"),
        (name = "Assignments", description = "Teaching assignments")
    ),
    info(
        title = "Aula API",
        version = "0.1.0",
        description = "REST backend for school administration: institutions, campuses, academic years, groups, people and schedules.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

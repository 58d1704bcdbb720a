//! Fake record generation.
//!
//! Records are generated in parallel using Rayon; nothing here touches the
//! store.

use fake::Fake;
use fake::faker::company::en::{Buzzword, CatchPhrase};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName, Title};
use fake::faker::phone_number::en::PhoneNumber;
use polis_models::{UpsertCourseDto, UpsertStudentDto, UpsertTeacherDto};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;

pub fn generate_teachers(count: usize) -> Vec<UpsertTeacherDto> {
    (0..count)
        .into_par_iter()
        .map(|_| UpsertTeacherDto {
            id: None,
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            title: Some(Title().fake()),
        })
        .collect()
}

/// Course codes are unique within one run: `<WORD>-<index>`.
pub fn generate_courses(count: usize) -> Vec<UpsertCourseDto> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let word: String = Buzzword().fake();
            let prefix: String = word.chars().filter(|c| c.is_ascii_alphabetic()).take(4).collect();

            UpsertCourseDto {
                id: None,
                code: format!("{}-{:03}", prefix.to_uppercase(), i + 1),
                title: CatchPhrase().fake(),
                description: Some(Sentence(6..14).fake()),
                year: Some((2018..2027).fake()),
            }
        })
        .collect()
}

pub fn generate_students(count: usize) -> Vec<UpsertStudentDto> {
    (0..count)
        .into_par_iter()
        .map(|i| UpsertStudentDto {
            id: None,
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            email: Some(SafeEmail().fake()),
            phone: Some(PhoneNumber().fake()),
            serial_number: Some(format!("S{:06}", i + 1)),
        })
        .collect()
}

/// Picks one owner per item, or nothing when there are no owners.
pub fn assign_randomly<T: Copy, R: Rng + ?Sized>(items: usize, owners: &[T], rng: &mut R) -> Vec<T> {
    (0..items)
        .filter_map(|_| owners.choose(rng).copied())
        .collect()
}

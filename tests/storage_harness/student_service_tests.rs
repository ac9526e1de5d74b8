//! Macro-generated test suite for `StudentService` contract validation.
//!
//! The `student_service_tests!` macro generates a test module that validates
//! any `StudentService` implementation against the full contract: CRUD,
//! validation, soft deletion, filtering, sorting, pagination and concurrent
//! access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use student_registry::storage::InMemoryStudentService;
//!
//! student_service_tests!(InMemoryStudentService::new());
//! ```

/// Generate a full `StudentService` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty service whose id sequence
/// starts at 1. It is re-evaluated for each test. For the concurrent access
/// test the service must also be `Clone + 'static`.
#[macro_export]
macro_rules! student_service_tests {
    ($factory:expr) => {
        mod student_service_contract_tests {
            use super::*;
            use student_registry::core::entity::StudentStatus;
            use student_registry::core::error::StudentError;
            use student_registry::core::field::StudentField;
            use student_registry::core::filter::{Predicate, StudentFilter};
            use student_registry::core::query::{PageRequest, SortSpec};
            use student_registry::core::service::StudentService;

            fn page(page: usize, size: usize, sort: SortSpec) -> PageRequest {
                PageRequest::new(page, size, sort)
            }

            fn first_names(students: &[student_registry::core::entity::Student]) -> Vec<&str> {
                students.iter().map(|s| s.first_name.as_str()).collect()
            }

            // ==================================================================
            // Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;

                let created = service.create(jane()).await.unwrap();
                assert_eq!(created.id, 1);
                assert_eq!(created.status, StudentStatus::Active);
                assert_eq!(created.first_name, "Jane");
                assert_eq!(created.last_name, "Doe");
                assert_eq!(created.email, "jane@x.com");
                assert_eq!(created.date_of_birth, date(1990, 1, 1));
                assert_eq!(created.enrollment_date, date(2020, 9, 1));
                assert_eq!(created.gpa, Some(8.5));

                let fetched = service.get(1).await.unwrap();
                assert_eq!(fetched, created);
            }

            #[tokio::test]
            async fn test_create_assigns_distinct_ids() {
                let service = $factory;

                let a = service.create(student_input("Anna", "Smith", None)).await.unwrap();
                let b = service.create(student_input("Ivan", "Petrov", None)).await.unwrap();
                assert_ne!(a.id, b.id);
                assert_eq!(service.count().await.unwrap(), 2);
            }

            #[tokio::test]
            async fn test_create_keeps_explicit_status() {
                let service = $factory;

                let input = with_status(jane(), StudentStatus::Inactive);
                let created = service.create(input).await.unwrap();
                assert_eq!(created.status, StudentStatus::Inactive);
            }

            #[tokio::test]
            async fn test_create_without_gpa() {
                let service = $factory;

                let created = service.create(student_input("Bob", "Lee", None)).await.unwrap();
                assert_eq!(created.gpa, None);
                assert_eq!(service.get(created.id).await.unwrap().gpa, None);
            }

            #[tokio::test]
            async fn test_create_accepts_gpa_bounds() {
                let service = $factory;

                service.create(student_input("Low", "Bound", Some(0.0))).await.unwrap();
                service.create(student_input("High", "Bound", Some(10.0))).await.unwrap();
                assert_eq!(service.count().await.unwrap(), 2);
            }

            #[tokio::test]
            async fn test_create_rejects_out_of_range_gpa() {
                let service = $factory;

                for gpa in [-0.1, 10.01, 42.0] {
                    let err = service
                        .create(student_input("Anna", "Smith", Some(gpa)))
                        .await
                        .unwrap_err();
                    match err {
                        StudentError::Validation(e) => {
                            assert!(e.fields().iter().any(|f| f.field == "gpa"));
                        }
                        other => panic!("expected validation error, got {:?}", other),
                    }
                }
                assert_eq!(service.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_create_rejects_blank_names() {
                let service = $factory;

                let err = service
                    .create(student_input("  ", "", Some(3.0)))
                    .await
                    .unwrap_err();
                let StudentError::Validation(e) = err else {
                    panic!("expected validation error");
                };
                let fields: Vec<&str> = e.fields().iter().map(|f| f.field.as_str()).collect();
                assert!(fields.contains(&"firstName"));
                assert!(fields.contains(&"lastName"));
                assert_eq!(service.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_create_rejects_invalid_email() {
                let service = $factory;

                let mut input = jane();
                input.email = "not-an-email".to_string();
                let err = service.create(input).await.unwrap_err();
                let StudentError::Validation(e) = err else {
                    panic!("expected validation error");
                };
                assert!(e
                    .fields()
                    .iter()
                    .any(|f| f.field == "email" && f.message == "Email should be valid"));
            }

            #[tokio::test]
            async fn test_create_requires_dates() {
                let service = $factory;

                let mut input = jane();
                input.date_of_birth = None;
                input.enrollment_date = None;
                let err = service.create(input).await.unwrap_err();
                let StudentError::Validation(e) = err else {
                    panic!("expected validation error");
                };
                let fields: Vec<&str> = e.fields().iter().map(|f| f.field.as_str()).collect();
                assert_eq!(fields, vec!["dateOfBirth", "enrollmentDate"]);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;

                let err = service.get(999).await.unwrap_err();
                assert!(matches!(err, StudentError::NotFound { id: 999 }));
            }

            // ==================================================================
            // Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_replaces_all_fields_and_keeps_id() {
                let service = $factory;
                let created = service.create(jane()).await.unwrap();

                let mut replacement = student_input("Janet", "Smith", Some(9.1));
                replacement.status = Some(StudentStatus::Inactive);
                let updated = service.update(created.id, replacement).await.unwrap();

                assert_eq!(updated.id, created.id);
                assert_eq!(updated.first_name, "Janet");
                assert_eq!(updated.last_name, "Smith");
                assert_eq!(updated.email, "janet.smith@example.com");
                assert_eq!(updated.date_of_birth, date(2001, 3, 14));
                assert_eq!(updated.gpa, Some(9.1));
                assert_eq!(updated.status, StudentStatus::Inactive);
                assert_eq!(service.get(created.id).await.unwrap(), updated);
            }

            #[tokio::test]
            async fn test_update_clears_omitted_gpa() {
                let service = $factory;
                let created = service.create(jane()).await.unwrap();

                let mut replacement = jane();
                replacement.gpa = None;
                let updated = service.update(created.id, replacement).await.unwrap();
                assert_eq!(updated.gpa, None);
            }

            #[tokio::test]
            async fn test_update_rejects_out_of_range_gpa() {
                let service = $factory;
                let created = service.create(jane()).await.unwrap();

                let mut replacement = jane();
                replacement.gpa = Some(11.0);
                let err = service.update(created.id, replacement).await.unwrap_err();
                assert!(matches!(err, StudentError::Validation(_)));

                assert_eq!(service.get(created.id).await.unwrap(), created);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                service.create(jane()).await.unwrap();

                let err = service.update(999, jane()).await.unwrap_err();
                assert!(matches!(err, StudentError::NotFound { id: 999 }));
                assert_eq!(service.count().await.unwrap(), 1);
            }

            // ==================================================================
            // Soft delete
            // ==================================================================

            #[tokio::test]
            async fn test_soft_delete_marks_inactive() {
                let service = $factory;
                let created = service.create(jane()).await.unwrap();

                service.soft_delete(created.id).await.unwrap();

                let fetched = service.get(created.id).await.unwrap();
                assert_eq!(fetched.status, StudentStatus::Inactive);
                assert_eq!(fetched.first_name, created.first_name);
                assert_eq!(fetched.gpa, created.gpa);
                assert_eq!(service.count().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_soft_delete_is_repeatable() {
                let service = $factory;
                let created = service.create(jane()).await.unwrap();

                service.soft_delete(created.id).await.unwrap();
                service.soft_delete(created.id).await.unwrap();
                assert_eq!(
                    service.get(created.id).await.unwrap().status,
                    StudentStatus::Inactive
                );
            }

            #[tokio::test]
            async fn test_soft_delete_nonexistent() {
                let service = $factory;

                let err = service.soft_delete(999).await.unwrap_err();
                assert!(matches!(err, StudentError::NotFound { id: 999 }));
                assert_eq!(service.count().await.unwrap(), 0);
            }

            // ==================================================================
            // Listing: filters
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;

                let result = service
                    .list(&Predicate::All, &PageRequest::default())
                    .await
                    .unwrap();
                assert!(result.items.is_empty());
                assert_eq!(result.total, 0);
            }

            #[tokio::test]
            async fn test_list_gpa_range_is_inclusive() {
                let service = $factory;
                for (name, gpa) in [
                    ("Low", Some(2.99)),
                    ("Min", Some(3.0)),
                    ("Mid", Some(3.5)),
                    ("Max", Some(4.0)),
                    ("High", Some(4.01)),
                    ("None", None),
                ] {
                    service.create(student_input(name, "Case", gpa)).await.unwrap();
                }

                let predicate = StudentFilter::new().with_gpa_range(3.0, 4.0).to_predicate();
                let result = service
                    .list(&predicate, &page(0, 10, SortSpec::asc(StudentField::Gpa)))
                    .await
                    .unwrap();

                assert_eq!(result.total, 3);
                assert_eq!(first_names(&result.items), vec!["Min", "Mid", "Max"]);
            }

            #[tokio::test]
            async fn test_list_single_gpa_bound_is_ignored() {
                let service = $factory;
                service.create(student_input("Low", "Case", Some(1.0))).await.unwrap();
                service.create(student_input("High", "Case", Some(9.0))).await.unwrap();

                let filter = StudentFilter {
                    min_gpa: Some(5.0),
                    ..StudentFilter::new()
                };
                let result = service
                    .list(&filter.to_predicate(), &PageRequest::default())
                    .await
                    .unwrap();
                assert_eq!(result.total, 2);
            }

            #[tokio::test]
            async fn test_list_name_filter() {
                let service = $factory;
                for input in name_fixture() {
                    service.create(input).await.unwrap();
                }

                let predicate = StudentFilter::new().with_name("an").to_predicate();
                let result = service
                    .list(&predicate, &PageRequest::default())
                    .await
                    .unwrap();

                assert_eq!(result.total, 2);
                assert_eq!(first_names(&result.items), vec!["Anna", "Ivan"]);
            }

            #[tokio::test]
            async fn test_list_name_filter_matches_last_name_ignoring_case() {
                let service = $factory;
                for input in name_fixture() {
                    service.create(input).await.unwrap();
                }

                let predicate = StudentFilter::new().with_name("PETR").to_predicate();
                let result = service
                    .list(&predicate, &PageRequest::default())
                    .await
                    .unwrap();
                assert_eq!(first_names(&result.items), vec!["Ivan"]);
            }

            #[tokio::test]
            async fn test_list_status_filter() {
                let service = $factory;
                for input in name_fixture() {
                    service.create(input).await.unwrap();
                }
                service.soft_delete(2).await.unwrap();

                let inactive = StudentFilter::new()
                    .with_status(StudentStatus::Inactive)
                    .to_predicate();
                let result = service
                    .list(&inactive, &PageRequest::default())
                    .await
                    .unwrap();
                assert_eq!(first_names(&result.items), vec!["Ivan"]);

                let active = StudentFilter::new()
                    .with_status(StudentStatus::Active)
                    .to_predicate();
                let result = service
                    .list(&active, &PageRequest::default())
                    .await
                    .unwrap();
                assert_eq!(result.total, 2);
            }

            #[tokio::test]
            async fn test_list_filters_are_anded() {
                let service = $factory;
                for input in name_fixture() {
                    service.create(input).await.unwrap();
                }
                service
                    .create(student_input("Diana", "Ross", Some(3.5)))
                    .await
                    .unwrap();
                service.soft_delete(4).await.unwrap();

                let predicate = StudentFilter::new()
                    .with_status(StudentStatus::Active)
                    .with_gpa_range(3.0, 4.0)
                    .with_name("an")
                    .to_predicate();
                let result = service
                    .list(&predicate, &PageRequest::default())
                    .await
                    .unwrap();
                assert_eq!(first_names(&result.items), vec!["Anna", "Ivan"]);
            }

            #[tokio::test]
            async fn test_list_name_filter_treats_wildcards_literally() {
                let service = $factory;
                service.create(student_input("Anna", "Smith", None)).await.unwrap();

                let predicate = StudentFilter::new().with_name("%").to_predicate();
                let result = service
                    .list(&predicate, &PageRequest::default())
                    .await
                    .unwrap();
                assert_eq!(result.total, 0);
            }

            // ==================================================================
            // Listing: sorting and pagination
            // ==================================================================

            #[tokio::test]
            async fn test_list_default_order_is_id_ascending() {
                let service = $factory;
                for input in name_fixture() {
                    service.create(input).await.unwrap();
                }

                let result = service
                    .list(&Predicate::All, &PageRequest::default())
                    .await
                    .unwrap();
                let ids: Vec<i64> = result.items.iter().map(|s| s.id).collect();
                assert_eq!(ids, vec![1, 2, 3]);
            }

            #[tokio::test]
            async fn test_list_sort_by_last_name_desc() {
                let service = $factory;
                for input in name_fixture() {
                    service.create(input).await.unwrap();
                }

                let result = service
                    .list(
                        &Predicate::All,
                        &page(0, 10, SortSpec::desc(StudentField::LastName)),
                    )
                    .await
                    .unwrap();
                assert_eq!(first_names(&result.items), vec!["Anna", "Ivan", "Bob"]);
            }

            #[tokio::test]
            async fn test_list_sort_by_text_is_byte_wise() {
                let service = $factory;
                service.create(student_input("Ann", "adams", None)).await.unwrap();
                service.create(student_input("Ben", "Baker", None)).await.unwrap();
                service.create(student_input("Cal", "Zane", None)).await.unwrap();

                let result = service
                    .list(
                        &Predicate::All,
                        &page(0, 10, SortSpec::asc(StudentField::LastName)),
                    )
                    .await
                    .unwrap();
                assert_eq!(first_names(&result.items), vec!["Ben", "Cal", "Ann"]);
            }

            #[tokio::test]
            async fn test_list_sort_places_missing_gpa_last_ascending() {
                let service = $factory;
                service.create(student_input("None", "Case", None)).await.unwrap();
                service.create(student_input("High", "Case", Some(9.0))).await.unwrap();
                service.create(student_input("Low", "Case", Some(1.0))).await.unwrap();

                let asc = service
                    .list(&Predicate::All, &page(0, 10, SortSpec::asc(StudentField::Gpa)))
                    .await
                    .unwrap();
                assert_eq!(first_names(&asc.items), vec!["Low", "High", "None"]);

                let desc = service
                    .list(&Predicate::All, &page(0, 10, SortSpec::desc(StudentField::Gpa)))
                    .await
                    .unwrap();
                assert_eq!(first_names(&desc.items), vec!["None", "High", "Low"]);
            }

            #[tokio::test]
            async fn test_list_sort_ties_break_by_id() {
                let service = $factory;
                service.create(student_input("Cara", "Same", Some(3.0))).await.unwrap();
                service.create(student_input("Abel", "Same", Some(3.0))).await.unwrap();
                service.create(student_input("Bert", "Same", Some(3.0))).await.unwrap();

                let result = service
                    .list(&Predicate::All, &page(0, 10, SortSpec::desc(StudentField::Gpa)))
                    .await
                    .unwrap();
                assert_eq!(first_names(&result.items), vec!["Cara", "Abel", "Bert"]);
            }

            #[tokio::test]
            async fn test_list_pagination() {
                let service = $factory;
                for i in 0..5 {
                    service
                        .create(student_input(&format!("Student{}", i), "Paged", Some(i as f64)))
                        .await
                        .unwrap();
                }

                let sort = SortSpec::asc(StudentField::Id);
                let first = service.list(&Predicate::All, &page(0, 2, sort)).await.unwrap();
                let second = service.list(&Predicate::All, &page(1, 2, sort)).await.unwrap();
                let last = service.list(&Predicate::All, &page(2, 2, sort)).await.unwrap();

                assert_eq!(first_names(&first.items), vec!["Student0", "Student1"]);
                assert_eq!(first_names(&second.items), vec!["Student2", "Student3"]);
                assert_eq!(first_names(&last.items), vec!["Student4"]);
                assert!([first.total, second.total, last.total].iter().all(|t| *t == 5));
            }

            #[tokio::test]
            async fn test_list_page_past_end_is_empty() {
                let service = $factory;
                for input in name_fixture() {
                    service.create(input).await.unwrap();
                }

                let result = service
                    .list(&Predicate::All, &page(5, 10, SortSpec::default()))
                    .await
                    .unwrap();
                assert!(result.items.is_empty());
                assert_eq!(result.total, 3);
            }

            #[tokio::test]
            async fn test_list_huge_page_index_is_empty() {
                let service = $factory;
                for input in name_fixture() {
                    service.create(input).await.unwrap();
                }

                let result = service
                    .list(&Predicate::All, &page(usize::MAX, 10, SortSpec::default()))
                    .await
                    .unwrap();
                assert!(result.items.is_empty());
                assert_eq!(result.total, 3);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let service = $factory;

                let mut handles = Vec::new();
                for i in 0..10 {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        service
                            .create(student_input(&format!("Student{}", i), "Concurrent", None))
                            .await
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap().unwrap().id);
                }
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 10);
                assert_eq!(service.count().await.unwrap(), 10);
            }
        }
    };
}

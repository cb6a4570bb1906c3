//! Trait plumbing shared by every stored model.

/// Implements `Identifiable`, `Timestamped` and `Entity` for a model with an
/// `id: Option<Id>` field.
///
/// With `timestamps`, the model's `created_at`/`updated_at` fields are read
/// and maintained on save. Without it the model carries no timestamps.
macro_rules! entity {
    ($model:ty, $table:literal, $type_name:literal) => {
        impl op_core::traits::Identifiable for $model {
            fn id(&self) -> Option<op_core::traits::Id> {
                self.id
            }
        }

        impl op_core::traits::Timestamped for $model {
            fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                None
            }

            fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                None
            }
        }

        impl op_core::traits::Entity for $model {
            const TABLE_NAME: &'static str = $table;
            const TYPE_NAME: &'static str = $type_name;

            fn assign_id(&mut self, id: op_core::traits::Id) {
                self.id = Some(id);
            }
        }
    };
    ($model:ty, $table:literal, $type_name:literal, timestamps) => {
        impl op_core::traits::Identifiable for $model {
            fn id(&self) -> Option<op_core::traits::Id> {
                self.id
            }
        }

        impl op_core::traits::Timestamped for $model {
            fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.created_at
            }

            fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.updated_at
            }
        }

        impl op_core::traits::Entity for $model {
            const TABLE_NAME: &'static str = $table;
            const TYPE_NAME: &'static str = $type_name;

            fn assign_id(&mut self, id: op_core::traits::Id) {
                self.id = Some(id);
            }

            fn touch(&mut self, now: chrono::DateTime<chrono::Utc>) {
                self.created_at.get_or_insert(now);
                self.updated_at = Some(now);
            }
        }
    };
}

/// Implements `ProjectScoped` from a required `project_id` field.
macro_rules! project_scoped {
    ($model:ty) => {
        impl op_core::traits::ProjectScoped for $model {
            fn project_id(&self) -> Option<op_core::traits::Id> {
                Some(self.project_id)
            }
        }
    };
}

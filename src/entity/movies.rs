use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub type_id: Uuid,
    pub age_category_id: Uuid,
    pub year: i32,
    /// Running time in minutes.
    pub timing: i32,
    pub keywords: String,
    pub description: String,
    pub director: String,
    pub producer: String,
    pub cover: String,
    pub watch_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie_types::Entity",
        from = "Column::TypeId",
        to = "super::movie_types::Column::Id"
    )]
    MovieTypes,
    #[sea_orm(
        belongs_to = "super::age_categories::Entity",
        from = "Column::AgeCategoryId",
        to = "super::age_categories::Column::Id"
    )]
    AgeCategories,
    #[sea_orm(has_many = "super::movie_categories::Entity")]
    MovieCategories,
    #[sea_orm(has_many = "super::screenshots::Entity")]
    Screenshots,
    #[sea_orm(has_many = "super::seasons::Entity")]
    Seasons,
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
}

impl Related<super::movie_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieTypes.def()
    }
}

impl Related<super::age_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AgeCategories.def()
    }
}

impl Related<super::movie_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieCategories.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_categories::Relation::Categories.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_categories::Relation::Movies.def().rev())
    }
}

impl Related<super::screenshots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Screenshots.def()
    }
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use crate::error::DbError;
use crate::rows::{CatalogRow, CountryRow, RecordRow, ScoreRow};
use crate::store::TrustStore;
use async_trait::async_trait;
use core_types::{Pillar, YearRange};
use sqlx::postgres::PgPool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Countries inserted by `seed_countries`: (iso3, iso2, name, region, income group).
const DEV_COUNTRIES: [(&str, &str, &str, &str, &str); 5] = [
    ("SWE", "SE", "Sweden", "Europe", "High income"),
    ("USA", "US", "United States", "North America", "High income"),
    ("BRA", "BR", "Brazil", "Latin America", "Upper middle income"),
    ("NGA", "NG", "Nigeria", "Africa", "Lower middle income"),
    ("IND", "IN", "India", "South Asia", "Lower middle income"),
];

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the development country set. Existing rows are left untouched,
    /// so this can be run repeatedly. Returns the number of rows inserted.
    pub async fn seed_countries(&self) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for (iso3, iso2, name, region, income_group) in DEV_COUNTRIES {
            let result = sqlx::query(
                r#"
                INSERT INTO countries (iso3, iso2, name, region, income_group)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (iso3) DO NOTHING
                "#,
            )
            .bind(iso3)
            .bind(iso2)
            .bind(name)
            .bind(region)
            .bind(income_group)
            .execute(&mut *tx) // Note: must use the transaction object `tx` here
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

#[async_trait]
impl TrustStore for DbRepository {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogRow>, DbError> {
        let rows = sqlx::query_as::<_, CatalogRow>(
            r#"
            SELECT
                c.iso3,
                c.name,
                c.region,
                latest.year AS latest_year,
                latest.gti::text AS latest_gti,
                latest.confidence_tier
            FROM countries AS c
            LEFT JOIN LATERAL (
                SELECT cy.year, cy.gti, cy.confidence_tier
                FROM country_year AS cy
                WHERE cy.iso3 = c.iso3
                ORDER BY cy.year DESC
                LIMIT 1
            ) AS latest ON TRUE
            ORDER BY c.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn fetch_max_year(&self) -> Result<Option<i32>, DbError> {
        let year = sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(year) FROM country_year")
            .fetch_one(&self.pool)
            .await?;
        Ok(year)
    }

    async fn fetch_scores_for_year(
        &self,
        year: i32,
        pillar: Pillar,
    ) -> Result<Vec<ScoreRow>, DbError> {
        let rows = sqlx::query_as::<_, ScoreRow>(score_query(pillar))
            .bind(year)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_country(&self, iso3: &str) -> Result<Option<CountryRow>, DbError> {
        let row = sqlx::query_as::<_, CountryRow>(
            "SELECT iso3, name, region FROM countries WHERE iso3 = $1",
        )
        .bind(iso3)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn fetch_series(&self, iso3: &str, range: YearRange) -> Result<Vec<RecordRow>, DbError> {
        // An open bound is bound as NULL and disables its half of the predicate.
        let (from, to) = range.bounds();
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT
                iso3,
                year,
                gti::text AS gti,
                interpersonal::text AS interpersonal,
                institutional::text AS institutional,
                governance::text AS governance,
                confidence_tier,
                confidence_score::text AS confidence_score,
                sources_used::text AS sources_used
            FROM country_year
            WHERE iso3 = $1
              AND ($2::integer IS NULL OR year >= $2)
              AND ($3::integer IS NULL OR year <= $3)
            ORDER BY year DESC
            "#,
        )
        .bind(iso3)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// The snapshot query for one pillar. Each arm is a fixed statement; the
/// column name never comes from the request.
fn score_query(pillar: Pillar) -> &'static str {
    match pillar {
        Pillar::Gti => {
            r#"
            SELECT c.name, cy.iso3, cy.year, cy.gti::text AS score, cy.confidence_tier
            FROM country_year AS cy
            JOIN countries AS c ON c.iso3 = cy.iso3
            WHERE cy.year = $1 AND cy.gti IS NOT NULL
            ORDER BY c.name ASC
            "#
        }
        Pillar::Interpersonal => {
            r#"
            SELECT c.name, cy.iso3, cy.year, cy.interpersonal::text AS score, cy.confidence_tier
            FROM country_year AS cy
            JOIN countries AS c ON c.iso3 = cy.iso3
            WHERE cy.year = $1 AND cy.interpersonal IS NOT NULL
            ORDER BY c.name ASC
            "#
        }
        Pillar::Institutional => {
            r#"
            SELECT c.name, cy.iso3, cy.year, cy.institutional::text AS score, cy.confidence_tier
            FROM country_year AS cy
            JOIN countries AS c ON c.iso3 = cy.iso3
            WHERE cy.year = $1 AND cy.institutional IS NOT NULL
            ORDER BY c.name ASC
            "#
        }
        Pillar::Governance => {
            r#"
            SELECT c.name, cy.iso3, cy.year, cy.governance::text AS score, cy.confidence_tier
            FROM country_year AS cy
            JOIN countries AS c ON c.iso3 = cy.iso3
            WHERE cy.year = $1 AND cy.governance IS NOT NULL
            ORDER BY c.name ASC
            "#
        }
    }
}

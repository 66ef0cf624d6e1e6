// src/services/billing_service.rs
//
// O motor de assinaturas/cobrança: gera os registros mensais, aplica
// patches de admin e deriva o status (paid/overdue/upcoming/pending).
// As funções de calendário e classificação são puras; o banco garante a
// unicidade (agência, ano, mês).

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AgencyRepository, BillingRepository},
    models::billing::{
        GenerateDebtPayload, PaymentRecord, PaymentRecordView, PaymentStatus,
        UpdatePaymentRecordPayload,
    },
};

// Janela de "a vencer": regra de negócio fixa, não configurável por agência
const UPCOMING_WINDOW_DAYS: i64 = 5;

// ---
// Funções puras de calendário
// ---

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_y, next_m) = next_month(year, month);
    NaiveDate::from_ymd_opt(next_y, next_m, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Vencimento do mês: o dia de cobrança da assinatura, ajustado ao último
/// dia válido do mês (billing_day 31 em fevereiro vence dia 28/29).
fn due_date_for(year: i32, month: u32, billing_day: i32) -> Result<NaiveDate, AppError> {
    let day = (billing_day as u32).min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("Data de vencimento inválida: {}-{}-{}", year, month, day).into())
}

/// Classificação derivada, calculada a cada leitura — nunca persistida.
fn classify(is_paid: bool, due_date: NaiveDate, today: NaiveDate) -> PaymentStatus {
    if is_paid {
        PaymentStatus::Paid
    } else if due_date < today {
        PaymentStatus::Overdue
    } else if (due_date - today).num_days() <= UPCOMING_WINDOW_DAYS {
        PaymentStatus::Upcoming
    } else {
        PaymentStatus::Pending
    }
}

/// Meses a cobrir no backfill de dívida: começa no mês seguinte ao último
/// registro existente (ou no mês corrente, se não há nenhum) e avança até
/// `max` meses, sem passar do mês de `end`.
fn months_to_backfill(
    latest: Option<(i32, u32)>,
    today: NaiveDate,
    end: (i32, u32),
    max: i32,
) -> Vec<(i32, u32)> {
    let (mut year, mut month) = match latest {
        Some((y, m)) => next_month(y, m),
        None => (today.year(), today.month()),
    };

    let mut months = Vec::new();
    while (months.len() as i32) < max && (year, month) <= end {
        months.push((year, month));
        (year, month) = next_month(year, month);
    }
    months
}

/// Resolve o par (is_paid, paid_at) de um patch. Marcar como pago sem
/// informar paid_at assume `now`; voltar para não-pago limpa paid_at
/// (não existe "não pago com data de pagamento").
fn resolve_payment_mark(
    patch_is_paid: Option<bool>,
    patch_paid_at: Option<DateTime<Utc>>,
    current_is_paid: bool,
    current_paid_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (bool, Option<DateTime<Utc>>) {
    match patch_is_paid {
        Some(true) => (true, patch_paid_at.or(Some(now))),
        Some(false) => (false, None),
        None => (current_is_paid, patch_paid_at.or(current_paid_at)),
    }
}

fn to_view(record: PaymentRecord, today: NaiveDate) -> PaymentRecordView {
    let status = classify(record.is_paid, record.due_date, today);
    PaymentRecordView { record, status }
}

// ---
// O serviço
// ---

#[derive(Clone)]
pub struct BillingService {
    billing_repo: BillingRepository,
    agency_repo: AgencyRepository,
    pool: sqlx::PgPool,
}

impl BillingService {
    pub fn new(
        billing_repo: BillingRepository,
        agency_repo: AgencyRepository,
        pool: sqlx::PgPool,
    ) -> Self {
        Self {
            billing_repo,
            agency_repo,
            pool,
        }
    }

    /// Gera o registro do mês para toda agência com assinatura ativa que
    /// ainda não o tenha. Idempotente: rodar duas vezes não duplica nada
    /// (a constraint UNIQUE decide corridas). Zero assinaturas ativas é
    /// sucesso com contagem 0, não erro.
    pub async fn generate_for_month(&self, month: i32, year: i32) -> Result<i64, AppError> {
        let subscriptions = self.billing_repo.list_active_subscriptions().await?;

        let mut tx = self.pool.begin().await?;
        let mut generated: i64 = 0;

        for subscription in &subscriptions {
            let due_date = due_date_for(year, month as u32, subscription.billing_day)?;

            let inserted = self
                .billing_repo
                .insert_record_if_absent(
                    &mut *tx,
                    subscription.agency_id,
                    subscription.id,
                    year,
                    month,
                    subscription.plan.monthly_price(),
                    due_date,
                    subscription.payment_method.as_deref(),
                )
                .await?;

            if inserted.is_some() {
                generated += 1;
            }
        }

        tx.commit().await?;

        tracing::info!(
            "💳 Geração de cobrança {}/{}: {} registros criados ({} assinaturas ativas)",
            month,
            year,
            generated,
            subscriptions.len()
        );

        Ok(generated)
    }

    /// Patch parcial de um registro. Recalcula total_amount sempre.
    /// Marcar como pago sem paid_at assume o momento da chamada; voltar
    /// para não-pago limpa paid_at (não existe "não pago com data de
    /// pagamento").
    pub async fn update_record(
        &self,
        id: Uuid,
        patch: &UpdatePaymentRecordPayload,
    ) -> Result<PaymentRecordView, AppError> {
        let current = self
            .billing_repo
            .find_record_by_id(id)
            .await?
            .ok_or(AppError::PaymentRecordNotFound)?;

        let extra_amount = patch.extra_amount.unwrap_or(current.extra_amount);
        let discount_amount = patch.discount_amount.unwrap_or(current.discount_amount);
        let total_amount = current.amount + extra_amount - discount_amount;

        let (is_paid, paid_at) = resolve_payment_mark(
            patch.is_paid,
            patch.paid_at,
            current.is_paid,
            current.paid_at,
            Utc::now(),
        );

        let payment_method = patch
            .payment_method
            .clone()
            .or(current.payment_method.clone());
        let notes = patch.notes.clone().or(current.notes.clone());

        let updated = self
            .billing_repo
            .update_record(
                id,
                extra_amount,
                discount_amount,
                total_amount,
                is_paid,
                paid_at,
                payment_method.as_deref(),
                notes.as_deref(),
            )
            .await?;

        Ok(to_view(updated, Utc::now().date_naive()))
    }

    /// Backfill de dívida: recupera agências que ficaram meses sem
    /// cobrança. Gera até months_to_generate registros consecutivos, do
    /// mês seguinte ao último registro até o mês de next_due_date, pulando
    /// meses que já existem. Preço = plano atual da agência.
    pub async fn generate_debt_records(
        &self,
        agency_id: Uuid,
        payload: &GenerateDebtPayload,
    ) -> Result<Vec<PaymentRecordView>, AppError> {
        self.agency_repo
            .find_by_id(agency_id)
            .await?
            .ok_or(AppError::AgencyNotFound)?;

        let subscription = self
            .billing_repo
            .find_subscription_by_agency(agency_id)
            .await?
            .ok_or(AppError::ResourceNotFound("Assinatura"))?;

        let today = Utc::now().date_naive();
        let latest = self
            .billing_repo
            .latest_record_for_agency(agency_id)
            .await?
            .map(|r| (r.year, r.month as u32));

        let end = (payload.next_due_date.year(), payload.next_due_date.month());
        let months = months_to_backfill(latest, today, end, payload.months_to_generate);

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(months.len());

        for (year, month) in months {
            let due_date = due_date_for(year, month, subscription.billing_day)?;

            let inserted = self
                .billing_repo
                .insert_record_if_absent(
                    &mut *tx,
                    agency_id,
                    subscription.id,
                    year,
                    month as i32,
                    subscription.plan.monthly_price(),
                    due_date,
                    subscription.payment_method.as_deref(),
                )
                .await?;

            // Mês já cobrado entra no intervalo mas não gera duplicata
            if let Some(record) = inserted {
                created.push(to_view(record, today));
            }
        }

        tx.commit().await?;

        tracing::info!(
            "💳 Backfill de dívida da agência {}: {} registros criados",
            agency_id,
            created.len()
        );

        Ok(created)
    }

    /// Listagem de admin: registros + status derivado na hora da leitura.
    pub async fn list_agency_records(
        &self,
        agency_id: Uuid,
    ) -> Result<Vec<PaymentRecordView>, AppError> {
        self.agency_repo
            .find_by_id(agency_id)
            .await?
            .ok_or(AppError::AgencyNotFound)?;

        let today = Utc::now().date_naive();
        let records = self.billing_repo.list_records_by_agency(agency_id).await?;

        Ok(records.into_iter().map(|r| to_view(r, today)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn vencimento_usa_o_dia_de_cobranca() {
        assert_eq!(due_date_for(2025, 3, 10).unwrap(), date(2025, 3, 10));
    }

    #[test]
    fn vencimento_ajusta_ao_ultimo_dia_do_mes() {
        // billing_day 31 em fevereiro
        assert_eq!(due_date_for(2025, 2, 31).unwrap(), date(2025, 2, 28));
        // ano bissexto
        assert_eq!(due_date_for(2024, 2, 31).unwrap(), date(2024, 2, 29));
        assert_eq!(due_date_for(2025, 4, 31).unwrap(), date(2025, 4, 30));
    }

    #[test]
    fn classificacao_pago_vence_qualquer_data() {
        // Pagar remove o status de vencido, mas o due_date histórico fica
        assert_eq!(
            classify(true, date(2025, 1, 10), date(2025, 6, 1)),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn classificacao_vencido_a_vencer_e_pendente() {
        let today = date(2025, 3, 10);
        assert_eq!(classify(false, date(2025, 3, 9), today), PaymentStatus::Overdue);
        // exatamente hoje ainda não está vencido
        assert_eq!(classify(false, date(2025, 3, 10), today), PaymentStatus::Upcoming);
        // borda da janela de 5 dias
        assert_eq!(classify(false, date(2025, 3, 15), today), PaymentStatus::Upcoming);
        assert_eq!(classify(false, date(2025, 3, 16), today), PaymentStatus::Pending);
    }

    #[test]
    fn backfill_comeca_no_mes_seguinte_ao_ultimo_registro() {
        // Cenário: último registro em 2025-01, 5 meses até 2025-06-05
        let months = months_to_backfill(
            Some((2025, 1)),
            date(2025, 6, 1),
            (2025, 6),
            5,
        );
        assert_eq!(
            months,
            vec![(2025, 2), (2025, 3), (2025, 4), (2025, 5), (2025, 6)]
        );
    }

    #[test]
    fn backfill_sem_historico_comeca_no_mes_corrente() {
        let months = months_to_backfill(None, date(2025, 4, 15), (2025, 6), 12);
        assert_eq!(months, vec![(2025, 4), (2025, 5), (2025, 6)]);
    }

    #[test]
    fn marcar_como_pago_sem_data_assume_o_momento_da_chamada() {
        let now = DateTime::parse_from_rfc3339("2025-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(
            resolve_payment_mark(Some(true), None, false, None, now),
            (true, Some(now))
        );

        // paid_at explícito vence o padrão
        let explicit = now - chrono::Duration::days(2);
        assert_eq!(
            resolve_payment_mark(Some(true), Some(explicit), false, None, now),
            (true, Some(explicit))
        );
    }

    #[test]
    fn desmarcar_pagamento_limpa_a_data() {
        let now = Utc::now();
        let paid_at = Some(now - chrono::Duration::days(30));
        assert_eq!(
            resolve_payment_mark(Some(false), None, true, paid_at, now),
            (false, None)
        );
    }

    #[test]
    fn patch_sem_is_paid_preserva_o_estado_atual() {
        let now = Utc::now();
        let paid_at = Some(now - chrono::Duration::days(5));
        assert_eq!(
            resolve_payment_mark(None, None, true, paid_at, now),
            (true, paid_at)
        );
    }

    #[test]
    fn backfill_respeita_o_limite_de_meses_e_a_virada_de_ano() {
        let months = months_to_backfill(Some((2024, 11)), date(2025, 2, 1), (2025, 2), 12);
        assert_eq!(months, vec![(2024, 12), (2025, 1), (2025, 2)]);

        let limited = months_to_backfill(Some((2024, 11)), date(2025, 2, 1), (2025, 6), 2);
        assert_eq!(limited, vec![(2024, 12), (2025, 1)]);
    }
}

use crate::app_shell::MainLayout;
use crate::domain::a001_employee::ui::list::EmployeeList;
use crate::domain::a002_hr_document::ui::list::HrDocumentList;
use crate::domain::a003_bank_document::ui::list::BankDocumentList;
use crate::domain::a004_salary_expense::ui::list::SalaryList;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireRole;
use crate::system::pages::login::LoginPage;
use crate::system::pages::profile::EmployeeProfile;
use crate::system::pages::register::RegisterPage;
use contracts::system::auth::Role;
use leptos::prelude::*;

/// Раздел приложения в левой навигации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Employees,
    HrDocuments,
    BankDocuments,
    Salaries,
    MyProfile,
}

impl Page {
    /// Порядок пунктов меню
    pub const ALL: [Page; 5] = [
        Self::Employees,
        Self::HrDocuments,
        Self::BankDocuments,
        Self::Salaries,
        Self::MyProfile,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Employees => "Employees",
            Self::HrDocuments => "HR Documents",
            Self::BankDocuments => "Bank Documents",
            Self::Salaries => "Salaries",
            Self::MyProfile => "My Profile",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::HrDocuments => "documents",
            Self::BankDocuments => "bank",
            Self::Salaries => "salaries",
            Self::MyProfile => "user",
        }
    }

    /// Роли, которым раздел доступен (кроме ADMIN, которому доступно всё рабочее)
    pub fn roles(&self) -> &'static [Role] {
        match self {
            Self::Employees => &[Role::Hr],
            Self::HrDocuments => &[Role::Hr],
            Self::BankDocuments => &[Role::DataManager],
            Self::Salaries => &[Role::Finance],
            Self::MyProfile => &[Role::Employee],
        }
    }

    fn open_to(&self, roles: &[Role]) -> bool {
        match self {
            Self::MyProfile => roles.contains(&Role::Employee),
            _ => roles.contains(&Role::Admin) || self.roles().iter().any(|r| roles.contains(r)),
        }
    }
}

/// Разделы, доступные набору ролей, в порядке меню
pub fn pages_for(roles: &[Role]) -> Vec<Page> {
    Page::ALL
        .into_iter()
        .filter(|page| page.open_to(roles))
        .collect()
}

/// Содержимое раздела
pub fn render_page(page: Page) -> AnyView {
    let roles = page.roles();
    match page {
        Page::Employees => view! { <RequireRole roles=roles><EmployeeList /></RequireRole> }.into_any(),
        Page::HrDocuments => view! { <RequireRole roles=roles><HrDocumentList /></RequireRole> }.into_any(),
        Page::BankDocuments => view! { <RequireRole roles=roles><BankDocumentList /></RequireRole> }.into_any(),
        Page::Salaries => view! { <RequireRole roles=roles><SalaryList /></RequireRole> }.into_any(),
        Page::MyProfile => view! { <RequireRole roles=roles><EmployeeProfile /></RequireRole> }.into_any(),
    }
}

/// Экран для гостя
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestScreen {
    Login,
    Register,
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let auth = use_auth();
    let guest_screen = RwSignal::new(GuestScreen::Login);

    view! {
        <Show
            when=move || auth.is_authenticated()
            fallback=move || {
                move || match guest_screen.get() {
                    GuestScreen::Login => view! {
                        <LoginPage on_register=Callback::new(move |_| guest_screen.set(GuestScreen::Register)) />
                    }
                    .into_any(),
                    GuestScreen::Register => view! {
                        <RegisterPage on_back=Callback::new(move |_| guest_screen.set(GuestScreen::Login)) />
                    }
                    .into_any(),
                }
            }
        >
            <MainLayout />
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_sees_every_work_page() {
        assert_eq!(
            pages_for(&[Role::Admin]),
            vec![Page::Employees, Page::HrDocuments, Page::BankDocuments, Page::Salaries]
        );
    }

    #[test]
    fn test_pages_per_role() {
        assert_eq!(pages_for(&[Role::Hr]), vec![Page::Employees, Page::HrDocuments]);
        assert_eq!(pages_for(&[Role::Finance]), vec![Page::Salaries]);
        assert_eq!(pages_for(&[Role::DataManager]), vec![Page::BankDocuments]);
        assert_eq!(pages_for(&[Role::Employee]), vec![Page::MyProfile]);
        assert!(pages_for(&[Role::Store]).is_empty());
    }

    #[test]
    fn test_pages_union_keeps_menu_order() {
        assert_eq!(
            pages_for(&[Role::Finance, Role::Hr]),
            vec![Page::Employees, Page::HrDocuments, Page::Salaries]
        );
    }
}

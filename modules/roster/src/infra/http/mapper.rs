use crate::contract::model::UserRecord;
use crate::infra::http::dto::UserDto;

impl From<UserDto> for UserRecord {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            username: dto.username,
            email: dto.email,
            street: dto.address.street,
            suite: dto.address.suite,
            city: dto.address.city,
            zipcode: dto.address.zipcode,
            phone: dto.phone,
            website: dto.website,
            company_name: dto.company.name,
            company_catch_phrase: dto.company.catch_phrase,
            company_bs: dto.company.bs,
        }
    }
}
